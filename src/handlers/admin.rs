//! Admin panel - dashboard counters, user management, audit log

use axum::{
  Json,
  extract::{Path, State},
};
use json::{Value, json};

use crate::{auth::AdminUser, prelude::*, state::AppState};

const LOG_PAGE_SIZE: u64 = 50;

pub async fn stats(
  State(app): State<Arc<AppState>>,
  AdminUser(_): AdminUser,
) -> Result<Json<Value>> {
  let sv = app.sv();
  let users = sv.user.stats().await?;
  let challenges = sv.challenge.count().await?;
  let quotes = sv.quote.count().await?;
  let achievements = sv.achievement.count().await?;

  Ok(Json(json!({
    "users": users,
    "challenges": { "total": challenges },
    "quotes": { "total": quotes },
    "achievements": { "total": achievements },
  })))
}

pub async fn users(
  State(app): State<Arc<AppState>>,
  AdminUser(_): AdminUser,
) -> Result<Json<Value>> {
  let sv = app.sv();
  let users = sv.user.all().await?;

  let mut items = Vec::with_capacity(users.len());
  for user in users {
    let points = sv.scoring.total_points(user.id).await?;
    items.push(json!({
      "id": user.id,
      "email": user.email,
      "name": user.full_name(),
      "roles": user.role_names(),
      "isActive": user.is_active,
      "totalPoints": points,
      "currentStreak": user.current_streak,
      "createdAt": user.created_at,
    }));
  }

  Ok(Json(json!(items)))
}

pub async fn logs(
  State(app): State<Arc<AppState>>,
  AdminUser(_): AdminUser,
) -> Result<Json<Value>> {
  let logs = app.sv().activity.recent(LOG_PAGE_SIZE).await?;

  let items: Vec<Value> = logs
    .iter()
    .map(|(log, user)| {
      json!({
        "id": log.id,
        "action": log.action,
        "user": user.as_ref().map(|u| u.email.clone()),
        "details": log.details,
        "ipAddress": log.ip_address,
        "userAgent": log.user_agent,
        "createdAt": log.created_at,
      })
    })
    .collect();

  Ok(Json(json!(items)))
}

pub async fn toggle_user(
  State(app): State<Arc<AppState>>,
  AdminUser(admin): AdminUser,
  Path(id): Path<i32>,
) -> Result<Json<Value>> {
  // an admin locking themselves out is always a mistake
  if admin.id == id {
    return Err(Error::Validation("Cannot block your own account".into()));
  }

  let user = app.sv().user.toggle_active(id).await?;

  info!(user_id = id, is_active = user.is_active, "Toggled user account");
  app.events.activity(
    Some(admin.id),
    if user.is_active { "unblock_user" } else { "block_user" },
    Some(json!({ "targetId": id })),
    None,
    None,
  );

  Ok(Json(json!({
    "id": user.id,
    "isActive": user.is_active,
  })))
}
