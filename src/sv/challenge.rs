//! Challenge catalog - read-mostly challenge definitions

use crate::{
  entity::challenge::{self, Difficulty},
  entity::participation,
  prelude::*,
};

pub struct Challenge<'a> {
  db: &'a DatabaseConnection,
}

fn difficulty_rank(difficulty: Difficulty) -> u8 {
  match difficulty {
    Difficulty::Easy => 0,
    Difficulty::Medium => 1,
    Difficulty::Hard => 2,
  }
}

impl<'a> Challenge<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn by_id(&self, id: i32) -> Result<Option<challenge::Model>> {
    let challenge = challenge::Entity::find_by_id(id).one(self.db).await?;
    Ok(challenge)
  }

  /// Catalog listing, easiest first, then by reward.
  pub async fn all_sorted(&self) -> Result<Vec<challenge::Model>> {
    let mut challenges = challenge::Entity::find().all(self.db).await?;
    challenges.sort_by_key(|c| (difficulty_rank(c.difficulty), c.points));
    Ok(challenges)
  }

  /// Enrollments of any status count as participants, matching the
  /// catalog's "N people tried this" number.
  pub async fn participants_count(&self, id: i32) -> Result<u64> {
    let count = participation::Entity::find()
      .filter(participation::Column::ChallengeId.eq(id))
      .count(self.db)
      .await?;
    Ok(count)
  }

  pub async fn count(&self) -> Result<u64> {
    Ok(challenge::Entity::find().count(self.db).await?)
  }

  pub async fn create(
    &self,
    title: &str,
    description: &str,
    duration_days: i32,
    difficulty: Difficulty,
    points: i32,
  ) -> Result<challenge::Model> {
    if duration_days <= 0 {
      return Err(Error::Validation("Duration must be positive".into()));
    }
    if points < 0 {
      return Err(Error::Validation("Points must not be negative".into()));
    }

    let now = Utc::now().naive_utc();
    let challenge = challenge::ActiveModel {
      title: Set(title.to_string()),
      description: Set(description.to_string()),
      duration_days: Set(duration_days),
      difficulty: Set(difficulty),
      points: Set(points),
      created_at: Set(now),
      ..Default::default()
    };

    Ok(challenge.insert(self.db).await?)
  }
}

#[cfg(test)]
mod tests {
  use sea_orm::{ConnectionTrait, Database, DbBackend, Schema};

  use super::*;
  use crate::entity::*;

  async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();

    let schema = Schema::new(DbBackend::Sqlite);

    let stmt = schema.create_table_from_entity(challenge::Entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    let stmt = schema.create_table_from_entity(participation::Entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    db
  }

  #[tokio::test]
  async fn test_catalog_sorted_by_difficulty() {
    let db = setup_test_db().await;
    let sv = Challenge::new(&db);

    sv.create("Week offline", "...", 7, Difficulty::Hard, 500).await.unwrap();
    sv.create("Morning quiet", "...", 3, Difficulty::Easy, 150).await.unwrap();
    sv.create("No socials", "...", 1, Difficulty::Easy, 100).await.unwrap();
    sv.create("Weekend out", "...", 2, Difficulty::Medium, 250).await.unwrap();

    let titles: Vec<_> = sv
      .all_sorted()
      .await
      .unwrap()
      .into_iter()
      .map(|c| c.title)
      .collect();

    assert_eq!(titles, ["No socials", "Morning quiet", "Weekend out", "Week offline"]);
  }

  #[tokio::test]
  async fn test_create_rejects_bad_duration() {
    let db = setup_test_db().await;
    let sv = Challenge::new(&db);

    let result = sv.create("Bad", "...", 0, Difficulty::Easy, 10).await;
    assert!(matches!(result, Err(Error::Validation(_))));
  }
}
