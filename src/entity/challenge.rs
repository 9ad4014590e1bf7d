//! Challenge entity - digital-detox challenge definitions

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Difficulty level enum
#[derive(
  Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize,
  Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  #[sea_orm(string_value = "easy")]
  Easy,
  #[sea_orm(string_value = "medium")]
  Medium,
  #[sea_orm(string_value = "hard")]
  Hard,
}

impl Default for Difficulty {
  fn default() -> Self {
    Self::Easy
  }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "challenges")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub title: String,
  pub description: String,
  /// challenge length in days, always positive
  pub duration_days: i32,
  pub difficulty: Difficulty,
  /// points awarded on completion
  pub points: i32,
  pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "super::participation::Entity")]
  Participations,
}

impl Related<super::participation::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Participations.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
