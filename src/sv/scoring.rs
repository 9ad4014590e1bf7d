//! Scoring & leaderboard engine
//!
//! Total points are always recomputed from completed participations; there
//! is no stored counter to drift out of sync. Ranking is positional and
//! 1-based everywhere: ties on (points, streak) get consecutive numbers in
//! whatever order the sort left them.

use std::collections::HashMap;

use crate::{
  entity::challenge,
  entity::participation::{self, Status},
  entity::user,
  prelude::*,
};

/// One row of the ranking: a user plus their derived totals.
pub struct Standing {
  pub user: user::Model,
  pub points: i64,
  pub completed: u64,
}

pub struct Scoring<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Scoring<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Sum of challenge points over completed participations. Joining or
  /// failing a challenge never moves this number.
  pub async fn total_points(&self, user_id: i32) -> Result<i64> {
    let rows = participation::Entity::find()
      .filter(participation::Column::UserId.eq(user_id))
      .filter(participation::Column::Status.eq(Status::Completed))
      .find_also_related(challenge::Entity)
      .all(self.db)
      .await?;

    Ok(
      rows
        .iter()
        .map(|(_, c)| c.as_ref().map_or(0, |c| i64::from(c.points)))
        .sum(),
    )
  }

  pub async fn completed_count(&self, user_id: i32) -> Result<u64> {
    let count = participation::Entity::find()
      .filter(participation::Column::UserId.eq(user_id))
      .filter(participation::Column::Status.eq(Status::Completed))
      .count(self.db)
      .await?;
    Ok(count)
  }

  /// (points, completed count) per user, over the whole ledger in one pass.
  async fn totals(&self) -> Result<HashMap<i32, (i64, u64)>> {
    let rows = participation::Entity::find()
      .filter(participation::Column::Status.eq(Status::Completed))
      .find_also_related(challenge::Entity)
      .all(self.db)
      .await?;

    let mut totals: HashMap<i32, (i64, u64)> = HashMap::new();
    for (row, challenge) in rows {
      let entry = totals.entry(row.user_id).or_default();
      entry.0 += challenge.as_ref().map_or(0, |c| i64::from(c.points));
      entry.1 += 1;
    }
    Ok(totals)
  }

  /// All active users sorted by points desc, then current streak desc.
  /// Position in the returned vec + 1 is the rank.
  pub async fn standings(&self) -> Result<Vec<Standing>> {
    let users = user::Entity::find()
      .filter(user::Column::IsActive.eq(true))
      .all(self.db)
      .await?;
    let totals = self.totals().await?;

    let mut standings: Vec<Standing> = users
      .into_iter()
      .map(|user| {
        let (points, completed) =
          totals.get(&user.id).copied().unwrap_or((0, 0));
        Standing { user, points, completed }
      })
      .collect();

    standings.sort_by(|a, b| {
      b.points
        .cmp(&a.points)
        .then_with(|| b.user.current_streak.cmp(&a.user.current_streak))
    });

    Ok(standings)
  }

  pub async fn leaderboard(&self, limit: usize) -> Result<Vec<Standing>> {
    let mut standings = self.standings().await?;
    standings.truncate(limit);
    Ok(standings)
  }

  /// 1-based positional rank among active users; `None` for users that do
  /// not appear in the ranking (blocked accounts).
  pub async fn rank_of(&self, user_id: i32) -> Result<Option<u64>> {
    let standings = self.standings().await?;
    Ok(
      standings
        .iter()
        .position(|s| s.user.id == user_id)
        .map(|pos| pos as u64 + 1),
    )
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

  async fn make_user(
    db: &DatabaseConnection,
    email: &str,
    streak: i32,
    active: bool,
  ) -> user::Model {
    user::ActiveModel {
      email: Set(email.to_string()),
      password_hash: Set("hash".to_string()),
      first_name: Set(email.split('@').next().unwrap().to_string()),
      last_name: Set("Test".to_string()),
      roles: Set(json::json!([])),
      is_active: Set(active),
      current_streak: Set(streak),
      max_streak: Set(streak),
      last_activity_date: Set(None),
      created_at: Set(Utc::now().naive_utc()),
      updated_at: Set(None),
      ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
  }

  async fn make_challenge(db: &DatabaseConnection, points: i32) -> challenge::Model {
    sv::Challenge::new(db)
      .create("Detox", "...", 7, Difficulty::Medium, points)
      .await
      .unwrap()
  }

  async fn complete(
    db: &DatabaseConnection,
    user: &user::Model,
    challenge: &challenge::Model,
  ) {
    let now = Utc::now().naive_utc();
    let sv = sv::Participation::new(db);
    sv.join(user, challenge.id, now).await.unwrap();
    sv.complete(user, challenge.id).await.unwrap();
  }

  #[tokio::test]
  async fn test_total_points_counts_only_completed() {
    let db = setup_test_db().await;
    let user = make_user(&db, "jan@example.com", 0, true).await;
    let done = make_challenge(&db, 300).await;
    let joined = make_challenge(&db, 250).await;
    let abandoned = make_challenge(&db, 500).await;

    let now = Utc::now().naive_utc();
    let ledger = sv::Participation::new(&db);

    complete(&db, &user, &done).await;
    ledger.join(&user, joined.id, now).await.unwrap();
    ledger.join(&user, abandoned.id, now).await.unwrap();
    ledger.leave(&user, abandoned.id).await.unwrap();

    let scoring = Scoring::new(&db);
    assert_eq!(scoring.total_points(user.id).await.unwrap(), 300);
    assert_eq!(scoring.completed_count(user.id).await.unwrap(), 1);
  }

  #[tokio::test]
  async fn test_leaderboard_points_then_streak() {
    let db = setup_test_db().await;
    // A and B tie on points, B wins the streak tiebreak
    let a = make_user(&db, "a@example.com", 2, true).await;
    let b = make_user(&db, "b@example.com", 5, true).await;
    let c = make_user(&db, "c@example.com", 10, true).await;

    let big = make_challenge(&db, 300).await;
    let small = make_challenge(&db, 100).await;

    complete(&db, &a, &big).await;
    complete(&db, &b, &big).await;
    complete(&db, &c, &small).await;

    let standings = Scoring::new(&db).leaderboard(10).await.unwrap();
    let emails: Vec<_> =
      standings.iter().map(|s| s.user.email.as_str()).collect();

    assert_eq!(emails, ["b@example.com", "a@example.com", "c@example.com"]);
    assert_eq!(standings[0].points, 300);
    assert_eq!(standings[2].points, 100);
  }

  #[tokio::test]
  async fn test_rank_is_positional() {
    let db = setup_test_db().await;
    let a = make_user(&db, "a@example.com", 2, true).await;
    let b = make_user(&db, "b@example.com", 5, true).await;

    let big = make_challenge(&db, 300).await;
    complete(&db, &a, &big).await;
    complete(&db, &b, &big).await;

    let scoring = Scoring::new(&db);
    // same points, streak decides; no shared rank numbers
    assert_eq!(scoring.rank_of(b.id).await.unwrap(), Some(1));
    assert_eq!(scoring.rank_of(a.id).await.unwrap(), Some(2));
  }

  #[tokio::test]
  async fn test_blocked_users_are_unranked() {
    let db = setup_test_db().await;
    let active = make_user(&db, "a@example.com", 0, true).await;
    let blocked = make_user(&db, "b@example.com", 0, false).await;

    let challenge = make_challenge(&db, 300).await;
    complete(&db, &blocked, &challenge).await;

    let scoring = Scoring::new(&db);
    let standings = scoring.leaderboard(10).await.unwrap();
    assert_eq!(standings.len(), 1);
    assert_eq!(standings[0].user.id, active.id);

    assert_eq!(scoring.rank_of(blocked.id).await.unwrap(), None);
  }
}
