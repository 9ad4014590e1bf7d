//! User entity - account data plus per-user streak state

use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const ROLE_USER: &str = "ROLE_USER";
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  #[sea_orm(unique)]
  pub email: String,
  #[serde(skip_serializing)]
  pub password_hash: String,
  pub first_name: String,
  pub last_name: String,
  /// json array of role names, `ROLE_USER` is implied
  pub roles: Json,
  pub is_active: bool,
  pub current_streak: i32,
  pub max_streak: i32,
  pub last_activity_date: Option<NaiveDate>,
  pub created_at: NaiveDateTime,
  pub updated_at: Option<NaiveDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "super::participation::Entity")]
  Participations,
  #[sea_orm(has_many = "super::user_achievement::Entity")]
  UserAchievements,
  #[sea_orm(has_many = "super::activity_log::Entity")]
  ActivityLogs,
}

impl Related<super::participation::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Participations.def()
  }
}

impl Related<super::user_achievement::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::UserAchievements.def()
  }
}

impl Related<super::activity_log::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::ActivityLogs.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }

  /// Role names as stored, with the implicit `ROLE_USER` appended.
  pub fn role_names(&self) -> Vec<String> {
    let mut roles: Vec<String> = self
      .roles
      .as_array()
      .map(|values| {
        values.iter().filter_map(|v| v.as_str().map(String::from)).collect()
      })
      .unwrap_or_default();

    if !roles.iter().any(|r| r == ROLE_USER) {
      roles.push(ROLE_USER.to_string());
    }
    roles
  }

  pub fn is_admin(&self) -> bool {
    self.role_names().iter().any(|r| r == ROLE_ADMIN)
  }
}
