//! Achievement definitions and per-user counts
//!
//! Badges are never granted automatically; the count feeds the progress
//! summary and eligibility checks live client-side.

use crate::{entity::achievement, entity::user_achievement, prelude::*};

pub struct Achievement<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Achievement<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn all(&self) -> Result<Vec<achievement::Model>> {
    let achievements = achievement::Entity::find()
      .order_by_asc(achievement::Column::PointsRequired)
      .all(self.db)
      .await?;
    Ok(achievements)
  }

  pub async fn count(&self) -> Result<u64> {
    Ok(achievement::Entity::find().count(self.db).await?)
  }

  pub async fn earned_count(&self, user_id: i32) -> Result<u64> {
    let count = user_achievement::Entity::find()
      .filter(user_achievement::Column::UserId.eq(user_id))
      .count(self.db)
      .await?;
    Ok(count)
  }
}
