//! Participation ledger - join/leave/complete lifecycle
//!
//! Status transitions are one-way: an `InProgress` row moves to `Completed`
//! or `Failed` exactly once and never back. The clock is always an explicit
//! argument so the lifecycle stays deterministic under test.

use crate::{
  entity::challenge,
  entity::participation::{self, Status},
  entity::user,
  prelude::*,
};

pub struct Participation<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Participation<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Enroll the user in a challenge. The check and the insert run in one
  /// transaction so concurrent joins for the same pair cannot both pass
  /// the at-most-one-active check.
  pub async fn join(
    &self,
    user: &user::Model,
    challenge_id: i32,
    now: DateTime,
  ) -> Result<(participation::Model, challenge::Model)> {
    let txn = self.db.begin().await?;

    let challenge = challenge::Entity::find_by_id(challenge_id)
      .one(&txn)
      .await?
      .ok_or(Error::ChallengeNotFound)?;

    let active = participation::Entity::find()
      .filter(participation::Column::UserId.eq(user.id))
      .filter(participation::Column::ChallengeId.eq(challenge_id))
      .filter(participation::Column::Status.eq(Status::InProgress))
      .one(&txn)
      .await?;

    if active.is_some() {
      return Err(Error::AlreadyJoined);
    }

    let end_date = now + TimeDelta::days(i64::from(challenge.duration_days));
    let row = participation::ActiveModel {
      user_id: Set(user.id),
      challenge_id: Set(challenge_id),
      status: Set(Status::InProgress),
      progress: Set(0),
      start_date: Set(now),
      end_date: Set(end_date),
      created_at: Set(now),
      ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    Ok((row, challenge))
  }

  /// Abandon the active enrollment. Progress is kept as-is; the row just
  /// becomes terminal.
  pub async fn leave(
    &self,
    user: &user::Model,
    challenge_id: i32,
  ) -> Result<participation::Model> {
    let row = self
      .find_active(user.id, challenge_id)
      .await?
      .ok_or(Error::ParticipationNotFound)?;

    let row = participation::ActiveModel {
      status: Set(Status::Failed),
      ..row.into()
    }
    .update(self.db)
    .await?;

    Ok(row)
  }

  /// Finish the active enrollment. Progress is forced to 100 no matter
  /// where it stood.
  pub async fn complete(
    &self,
    user: &user::Model,
    challenge_id: i32,
  ) -> Result<(participation::Model, challenge::Model)> {
    let row = self
      .find_active(user.id, challenge_id)
      .await?
      .ok_or(Error::ParticipationNotFound)?;

    let challenge = challenge::Entity::find_by_id(challenge_id)
      .one(self.db)
      .await?
      .ok_or(Error::ChallengeNotFound)?;

    let row = participation::ActiveModel {
      status: Set(Status::Completed),
      progress: Set(100),
      ..row.into()
    }
    .update(self.db)
    .await?;

    Ok((row, challenge))
  }

  /// Update progress on the active enrollment. Out-of-range values are
  /// clamped to 0..=100, not rejected.
  pub async fn set_progress(
    &self,
    user: &user::Model,
    challenge_id: i32,
    progress: i32,
  ) -> Result<participation::Model> {
    let row = self
      .find_active(user.id, challenge_id)
      .await?
      .ok_or(Error::ParticipationNotFound)?;

    let row = participation::ActiveModel {
      progress: Set(progress.clamp(0, 100)),
      ..row.into()
    }
    .update(self.db)
    .await?;

    Ok(row)
  }

  pub async fn find_active(
    &self,
    user_id: i32,
    challenge_id: i32,
  ) -> Result<Option<participation::Model>> {
    let row = participation::Entity::find()
      .filter(participation::Column::UserId.eq(user_id))
      .filter(participation::Column::ChallengeId.eq(challenge_id))
      .filter(participation::Column::Status.eq(Status::InProgress))
      .one(self.db)
      .await?;
    Ok(row)
  }

  pub async fn active_for(
    &self,
    user_id: i32,
  ) -> Result<Vec<(participation::Model, Option<challenge::Model>)>> {
    let rows = participation::Entity::find()
      .filter(participation::Column::UserId.eq(user_id))
      .filter(participation::Column::Status.eq(Status::InProgress))
      .order_by_desc(participation::Column::StartDate)
      .find_also_related(challenge::Entity)
      .all(self.db)
      .await?;
    Ok(rows)
  }

  pub async fn completed_for(
    &self,
    user_id: i32,
  ) -> Result<Vec<participation::Model>> {
    let rows = participation::Entity::find()
      .filter(participation::Column::UserId.eq(user_id))
      .filter(participation::Column::Status.eq(Status::Completed))
      .order_by_desc(participation::Column::CreatedAt)
      .all(self.db)
      .await?;
    Ok(rows)
  }

  /// Full enrollment history, newest first.
  pub async fn history_for(
    &self,
    user_id: i32,
  ) -> Result<Vec<(participation::Model, Option<challenge::Model>)>> {
    let rows = participation::Entity::find()
      .filter(participation::Column::UserId.eq(user_id))
      .order_by_desc(participation::Column::CreatedAt)
      .find_also_related(challenge::Entity)
      .all(self.db)
      .await?;
    Ok(rows)
  }
}

#[cfg(test)]
mod tests {
  use sea_orm::{ConnectionTrait, Database, DbBackend, Schema};

  use super::*;
  use crate::entity::challenge::Difficulty;
  use crate::entity::*;
  use crate::sv;

  async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();

    let schema = Schema::new(DbBackend::Sqlite);

    let stmt = schema.create_table_from_entity(user::Entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    let stmt = schema.create_table_from_entity(challenge::Entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    let stmt = schema.create_table_from_entity(participation::Entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    db
  }

  async fn make_user(db: &DatabaseConnection, email: &str) -> user::Model {
    user::ActiveModel {
      email: Set(email.to_string()),
      password_hash: Set("hash".to_string()),
      first_name: Set("Jan".to_string()),
      last_name: Set("Kowalski".to_string()),
      roles: Set(json::json!([])),
      is_active: Set(true),
      current_streak: Set(0),
      max_streak: Set(0),
      last_activity_date: Set(None),
      created_at: Set(Utc::now().naive_utc()),
      updated_at: Set(None),
      ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
  }

  async fn make_challenge(
    db: &DatabaseConnection,
    days: i32,
    points: i32,
  ) -> challenge::Model {
    sv::Challenge::new(db)
      .create("24h offline", "One day without screens.", days, Difficulty::Easy, points)
      .await
      .unwrap()
  }

  fn at(year: i32, month: u32, day: u32) -> DateTime {
    Date::from_ymd_opt(year, month, day).unwrap().and_hms_opt(8, 0, 0).unwrap()
  }

  #[tokio::test]
  async fn test_join_computes_end_date() {
    let db = setup_test_db().await;
    let user = make_user(&db, "jan@example.com").await;
    let challenge = make_challenge(&db, 7, 100).await;

    let (row, _) = Participation::new(&db)
      .join(&user, challenge.id, at(2024, 1, 1))
      .await
      .unwrap();

    assert_eq!(row.status, Status::InProgress);
    assert_eq!(row.progress, 0);
    assert_eq!(row.start_date.date(), Date::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(row.end_date.date(), Date::from_ymd_opt(2024, 1, 8).unwrap());
  }

  #[tokio::test]
  async fn test_double_join_conflicts() {
    let db = setup_test_db().await;
    let user = make_user(&db, "jan@example.com").await;
    let challenge = make_challenge(&db, 7, 100).await;
    let sv = Participation::new(&db);

    sv.join(&user, challenge.id, at(2024, 1, 1)).await.unwrap();

    let second = sv.join(&user, challenge.id, at(2024, 1, 2)).await;
    assert!(matches!(second, Err(Error::AlreadyJoined)));
  }

  #[tokio::test]
  async fn test_join_unknown_challenge() {
    let db = setup_test_db().await;
    let user = make_user(&db, "jan@example.com").await;

    let result =
      Participation::new(&db).join(&user, 999, at(2024, 1, 1)).await;
    assert!(matches!(result, Err(Error::ChallengeNotFound)));
  }

  #[tokio::test]
  async fn test_complete_forces_full_progress() {
    let db = setup_test_db().await;
    let user = make_user(&db, "jan@example.com").await;
    let challenge = make_challenge(&db, 7, 100).await;
    let sv = Participation::new(&db);

    sv.join(&user, challenge.id, at(2024, 1, 1)).await.unwrap();
    sv.set_progress(&user, challenge.id, 20).await.unwrap();

    let (row, earned) = sv.complete(&user, challenge.id).await.unwrap();

    assert_eq!(row.status, Status::Completed);
    assert_eq!(row.progress, 100);
    assert_eq!(earned.points, 100);
  }

  #[tokio::test]
  async fn test_leave_keeps_progress_and_is_terminal() {
    let db = setup_test_db().await;
    let user = make_user(&db, "jan@example.com").await;
    let challenge = make_challenge(&db, 7, 100).await;
    let sv = Participation::new(&db);

    sv.join(&user, challenge.id, at(2024, 1, 1)).await.unwrap();
    sv.set_progress(&user, challenge.id, 40).await.unwrap();

    let row = sv.leave(&user, challenge.id).await.unwrap();
    assert_eq!(row.status, Status::Failed);
    assert_eq!(row.progress, 40);

    // no active row left, so both transitions now miss
    assert!(matches!(
      sv.leave(&user, challenge.id).await,
      Err(Error::ParticipationNotFound)
    ));
    assert!(matches!(
      sv.complete(&user, challenge.id).await,
      Err(Error::ParticipationNotFound)
    ));
  }

  #[tokio::test]
  async fn test_rejoin_after_terminal_creates_new_row() {
    let db = setup_test_db().await;
    let user = make_user(&db, "jan@example.com").await;
    let challenge = make_challenge(&db, 7, 100).await;
    let sv = Participation::new(&db);

    sv.join(&user, challenge.id, at(2024, 1, 1)).await.unwrap();
    sv.complete(&user, challenge.id).await.unwrap();

    let (second, _) =
      sv.join(&user, challenge.id, at(2024, 2, 1)).await.unwrap();
    assert_eq!(second.status, Status::InProgress);
    assert_eq!(second.progress, 0);

    let history = sv.history_for(user.id).await.unwrap();
    assert_eq!(history.len(), 2);
  }

  #[tokio::test]
  async fn test_set_progress_clamps() {
    let db = setup_test_db().await;
    let user = make_user(&db, "jan@example.com").await;
    let challenge = make_challenge(&db, 7, 100).await;
    let sv = Participation::new(&db);

    sv.join(&user, challenge.id, at(2024, 1, 1)).await.unwrap();

    let row = sv.set_progress(&user, challenge.id, -10).await.unwrap();
    assert_eq!(row.progress, 0);

    let row = sv.set_progress(&user, challenge.id, 150).await.unwrap();
    assert_eq!(row.progress, 100);

    let row = sv.set_progress(&user, challenge.id, 55).await.unwrap();
    assert_eq!(row.progress, 55);
  }

  #[tokio::test]
  async fn test_remaining_days_never_negative() {
    let db = setup_test_db().await;
    let user = make_user(&db, "jan@example.com").await;
    let challenge = make_challenge(&db, 7, 100).await;

    let (row, _) = Participation::new(&db)
      .join(&user, challenge.id, at(2024, 1, 1))
      .await
      .unwrap();

    let mid = Date::from_ymd_opt(2024, 1, 5).unwrap();
    assert_eq!(row.remaining_days(mid), 3);

    // two days past the end date: still InProgress, reports zero
    let late = Date::from_ymd_opt(2024, 1, 10).unwrap();
    assert_eq!(row.remaining_days(late), 0);
    assert!(row.is_active());
  }
}
