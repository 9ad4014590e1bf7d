//! UserAchievement entity - badges earned by users

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_achievements")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub user_id: i32,
  pub achievement_id: i32,
  pub earned_at: NaiveDateTime,
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
    belongs_to = "super::achievement::Entity",
    from = "Column::AchievementId",
    to = "super::achievement::Column::Id"
  )]
  Achievement,
}

impl Related<super::user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::User.def()
  }
}

impl Related<super::achievement::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Achievement.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
