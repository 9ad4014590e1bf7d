//! Achievement entity - badge definitions
//!
//! Nothing grants these automatically; eligibility is checked against the
//! completed-participation count and derived points.

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "achievements")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub name: String,
  pub description: String,
  pub icon: Option<String>,
  pub points_required: i32,
  pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "super::user_achievement::Entity")]
  UserAchievements,
}

impl Related<super::user_achievement::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::UserAchievements.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
