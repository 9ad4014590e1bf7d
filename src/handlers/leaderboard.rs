//! Ranking, daily check-in and streak status

use axum::{Json, extract::State};
use json::{Value, json};

use crate::{auth::AuthUser, prelude::*, state::AppState};

pub async fn index(
  State(app): State<Arc<AppState>>,
  AuthUser(user): AuthUser,
) -> Result<Json<Value>> {
  let sv = app.sv();

  let standings = sv.scoring.leaderboard(app.config.leaderboard_size).await?;
  let entries: Vec<Value> = standings
    .iter()
    .enumerate()
    .map(|(pos, standing)| {
      json!({
        "rank": pos + 1,
        "id": standing.user.id,
        "name": standing.user.full_name(),
        "points": standing.points,
        "streak": standing.user.current_streak,
        "maxStreak": standing.user.max_streak,
        "completedChallenges": standing.completed,
        "isCurrentUser": standing.user.id == user.id,
      })
    })
    .collect();

  let rank = sv.scoring.rank_of(user.id).await?;
  let points = sv.scoring.total_points(user.id).await?;
  let completed = sv.scoring.completed_count(user.id).await?;

  Ok(Json(json!({
    "leaderboard": entries,
    "myStats": {
      "rank": rank,
      "points": points,
      "completedChallenges": completed,
      "currentStreak": user.current_streak,
      "maxStreak": user.max_streak,
    },
  })))
}

pub async fn check_in(
  State(app): State<Arc<AppState>>,
  AuthUser(user): AuthUser,
) -> Result<Json<Value>> {
  let today = Utc::now().date_naive();
  let result = app.sv().streak.check_in(&user, today).await?;

  let message = if result.increased {
    "Streak continued!"
  } else {
    "Already checked in today!"
  };

  Ok(Json(json!({
    "message": message,
    "currentStreak": result.current_streak,
    "maxStreak": result.max_streak,
    "streakIncreased": result.increased,
  })))
}

pub async fn streak(
  State(app): State<Arc<AppState>>,
  AuthUser(user): AuthUser,
) -> Result<Json<Value>> {
  let today = Utc::now().date_naive();
  let status = app.sv().streak.status_of(&user, today);

  Ok(Json(json!({
    "currentStreak": status.current_streak,
    "maxStreak": status.max_streak,
    "lastActivityDate": status.last_activity_date,
    "streakActive": status.active,
    "needsCheckIn": status.needs_check_in,
  })))
}
