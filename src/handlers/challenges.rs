//! Challenge catalog and the join/leave/complete lifecycle

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use json::{Value, json};
use serde::Deserialize;

use crate::{auth::AuthUser, events::Event, prelude::*, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ProgressReq {
  pub progress: i32,
}

pub async fn list(
  State(app): State<Arc<AppState>>,
  AuthUser(user): AuthUser,
) -> Result<Json<Value>> {
  let sv = app.sv();
  let challenges = sv.challenge.all_sorted().await?;

  let mut items = Vec::with_capacity(challenges.len());
  for challenge in challenges {
    let participants = sv.challenge.participants_count(challenge.id).await?;
    let mine = sv.participation.find_active(user.id, challenge.id).await?;

    items.push(json!({
      "id": challenge.id,
      "title": challenge.title,
      "description": challenge.description,
      "durationDays": challenge.duration_days,
      "difficulty": challenge.difficulty,
      "points": challenge.points,
      "participantsCount": participants,
      "isJoined": mine.is_some(),
      "progress": mine.map(|p| p.progress),
    }));
  }

  Ok(Json(json!(items)))
}

pub async fn show(
  State(app): State<Arc<AppState>>,
  AuthUser(user): AuthUser,
  Path(id): Path<i32>,
) -> Result<Json<Value>> {
  let sv = app.sv();
  let challenge = sv.challenge.by_id(id).await?.ok_or(Error::ChallengeNotFound)?;
  let participants = sv.challenge.participants_count(id).await?;
  let mine = sv.participation.find_active(user.id, id).await?;

  Ok(Json(json!({
    "id": challenge.id,
    "title": challenge.title,
    "description": challenge.description,
    "durationDays": challenge.duration_days,
    "difficulty": challenge.difficulty,
    "points": challenge.points,
    "participantsCount": participants,
    "isJoined": mine.is_some(),
    "progress": mine.map(|p| p.progress),
  })))
}

pub async fn join(
  State(app): State<Arc<AppState>>,
  AuthUser(user): AuthUser,
  Path(id): Path<i32>,
) -> Result<(StatusCode, Json<Value>)> {
  let now = Utc::now().naive_utc();
  let (row, challenge) = app.sv().participation.join(&user, id, now).await?;

  info!(user_id = user.id, challenge_id = id, "Joined challenge");
  app.events.dispatch(Event::Activity {
    user_id: Some(user.id),
    action: "join_challenge".to_string(),
    details: Some(json!({ "challengeId": id, "title": challenge.title })),
    ip_address: None,
    user_agent: None,
  });

  Ok((
    StatusCode::CREATED,
    Json(json!({
      "message": "Successfully joined the challenge",
      "challenge": challenge.title,
      "endsAt": row.end_date,
    })),
  ))
}

pub async fn leave(
  State(app): State<Arc<AppState>>,
  AuthUser(user): AuthUser,
  Path(id): Path<i32>,
) -> Result<Json<Value>> {
  let row = app.sv().participation.leave(&user, id).await?;

  app.events.activity(
    Some(user.id),
    "leave_challenge",
    Some(json!({ "challengeId": id })),
    None,
    None,
  );

  Ok(Json(json!({
    "message": "Left the challenge",
    "progress": row.progress,
  })))
}

pub async fn complete(
  State(app): State<Arc<AppState>>,
  AuthUser(user): AuthUser,
  Path(id): Path<i32>,
) -> Result<Json<Value>> {
  let (_, challenge) = app.sv().participation.complete(&user, id).await?;

  info!(
    user_id = user.id,
    challenge_id = id,
    points = challenge.points,
    "Challenge completed"
  );
  app.events.activity(
    Some(user.id),
    "complete_challenge",
    Some(json!({ "challengeId": id, "points": challenge.points })),
    None,
    None,
  );

  Ok(Json(json!({
    "message": "Challenge completed!",
    "points": challenge.points,
  })))
}

pub async fn set_progress(
  State(app): State<Arc<AppState>>,
  AuthUser(user): AuthUser,
  Path(id): Path<i32>,
  Json(req): Json<ProgressReq>,
) -> Result<Json<Value>> {
  let row =
    app.sv().participation.set_progress(&user, id, req.progress).await?;

  Ok(Json(json!({ "progress": row.progress })))
}
