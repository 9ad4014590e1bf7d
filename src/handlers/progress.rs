//! Personal progress dashboard and enrollment history

use axum::{Json, extract::State};
use json::{Value, json};

use crate::{auth::AuthUser, prelude::*, state::AppState};

pub async fn summary(
  State(app): State<Arc<AppState>>,
  AuthUser(user): AuthUser,
) -> Result<Json<Value>> {
  let sv = app.sv();
  let today = Utc::now().date_naive();

  let active = sv.participation.active_for(user.id).await?;
  let points = sv.scoring.total_points(user.id).await?;
  let completed = sv.scoring.completed_count(user.id).await?;
  let achievements = sv.achievement.earned_count(user.id).await?;

  let cards: Vec<Value> = active
    .iter()
    .map(|(row, challenge)| {
      json!({
        "id": row.challenge_id,
        "title": challenge.as_ref().map(|c| c.title.clone()),
        "points": challenge.as_ref().map(|c| c.points),
        "progress": row.progress,
        "startedAt": row.start_date,
        "endsAt": row.end_date,
        "remainingDays": row.remaining_days(today),
      })
    })
    .collect();

  Ok(Json(json!({
    "totalPoints": points,
    "completedChallenges": completed,
    "activeChallenges": cards.len(),
    "achievements": achievements,
    "currentStreak": user.current_streak,
    "challenges": cards,
  })))
}

pub async fn history(
  State(app): State<Arc<AppState>>,
  AuthUser(user): AuthUser,
) -> Result<Json<Value>> {
  let rows = app.sv().participation.history_for(user.id).await?;

  let items: Vec<Value> = rows
    .iter()
    .map(|(row, challenge)| {
      json!({
        "id": row.id,
        "challengeId": row.challenge_id,
        "title": challenge.as_ref().map(|c| c.title.clone()),
        "status": row.status,
        "progress": row.progress,
        "points": challenge.as_ref().map(|c| c.points),
        "startedAt": row.start_date,
        "endsAt": row.end_date,
      })
    })
    .collect();

  Ok(Json(json!(items)))
}
