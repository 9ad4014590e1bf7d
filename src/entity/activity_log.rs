//! ActivityLog entity - audit trail written by the event worker

use chrono::NaiveDateTime;
use json::Value;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity_logs")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  /// nullable, some actions are anonymous (e.g. failed logins)
  pub user_id: Option<i32>,
  pub action: String,
  pub details: Option<Value>,
  pub ip_address: Option<String>,
  pub user_agent: Option<String>,
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
}

impl Related<super::user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::User.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
