//! Participation entity - one enrollment of a user in a challenge
//!
//! A user may hold at most one `InProgress` row per challenge; terminal
//! rows (completed/failed) stay around as history and a new enrollment
//! creates a fresh row.

use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
  Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize,
  Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum Status {
  #[sea_orm(string_value = "in_progress")]
  InProgress,
  #[sea_orm(string_value = "completed")]
  Completed,
  #[sea_orm(string_value = "failed")]
  Failed,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "participations")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub user_id: i32,
  pub challenge_id: i32,
  pub status: Status,
  /// progress percentage, clamped to 0..=100
  pub progress: i32,
  pub start_date: NaiveDateTime,
  /// start_date + challenge duration, fixed at enrollment
  pub end_date: NaiveDateTime,
  pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "super::user::Entity",
    from = "Column::UserId",
    to = "super::user::Column::Id"
  )]
  User,
  #[sea_orm(
    belongs_to = "super::challenge::Entity",
    from = "Column::ChallengeId",
    to = "super::challenge::Column::Id"
  )]
  Challenge,
}

impl Related<super::user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::User.def()
  }
}

impl Related<super::challenge::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Challenge.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
  /// Days left until the end date, never negative. An overdue row that is
  /// still `InProgress` keeps reporting 0 until it is completed or left.
  pub fn remaining_days(&self, today: NaiveDate) -> i64 {
    (self.end_date.date() - today).num_days().max(0)
  }

  pub fn is_active(&self) -> bool {
    self.status == Status::InProgress
  }
}
