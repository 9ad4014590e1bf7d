//! Registration, login and the current-user profile

use std::net::SocketAddr;

use axum::{
  Json,
  extract::{ConnectInfo, State},
  http::{HeaderMap, StatusCode},
};
use json::{Value, json};
use serde::Deserialize;

use crate::{
  auth::{AuthUser, Claims, issue_token},
  events::Event,
  handlers::user_agent,
  prelude::*,
  state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterReq {
  pub email: String,
  pub password: String,
  pub first_name: String,
  pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginReq {
  pub email: String,
  pub password: String,
}

pub async fn register(
  State(app): State<Arc<AppState>>,
  ConnectInfo(addr): ConnectInfo<SocketAddr>,
  headers: HeaderMap,
  Json(req): Json<RegisterReq>,
) -> Result<(StatusCode, Json<Value>)> {
  let user = app
    .sv()
    .user
    .register(&req.email, &req.password, &req.first_name, &req.last_name)
    .await?;

  info!(user_id = user.id, "New user registered");

  app.events.dispatch(Event::UserRegistered { user_id: user.id });
  app.events.activity(
    Some(user.id),
    "register",
    None,
    Some(addr.ip().to_string()),
    user_agent(&headers),
  );

  Ok((
    StatusCode::CREATED,
    Json(json!({
      "message": "User registered successfully",
      "user": {
        "id": user.id,
        "email": user.email,
        "firstName": user.first_name,
        "lastName": user.last_name,
      },
    })),
  ))
}

pub async fn login(
  State(app): State<Arc<AppState>>,
  ConnectInfo(addr): ConnectInfo<SocketAddr>,
  headers: HeaderMap,
  Json(req): Json<LoginReq>,
) -> Result<Json<Value>> {
  let ip = Some(addr.ip().to_string());
  let agent = user_agent(&headers);

  let user = match app.sv().user.authenticate(&req.email, &req.password).await
  {
    Ok(user) => user,
    Err(err @ Error::InvalidCredentials) => {
      app.events.activity(
        None,
        "login_failed",
        Some(json!({ "email": req.email })),
        ip,
        agent,
      );
      return Err(err);
    }
    Err(err) => return Err(err),
  };

  let claims = Claims::new(&user, app.config.token_ttl_hours);
  let token = issue_token(&claims, &app.secret)?;

  app.events.activity(Some(user.id), "login", None, ip, agent);

  Ok(Json(json!({
    "token": token,
    "user": {
      "id": user.id,
      "email": user.email,
      "firstName": user.first_name,
      "lastName": user.last_name,
      "roles": user.role_names(),
    },
  })))
}

pub async fn me(
  State(app): State<Arc<AppState>>,
  AuthUser(user): AuthUser,
) -> Result<Json<Value>> {
  let sv = app.sv();
  let points = sv.scoring.total_points(user.id).await?;
  let completed = sv.scoring.completed_count(user.id).await?;

  Ok(Json(json!({
    "id": user.id,
    "email": user.email,
    "firstName": user.first_name,
    "lastName": user.last_name,
    "roles": user.role_names(),
    "totalPoints": points,
    "completedChallenges": completed,
    "currentStreak": user.current_streak,
    "maxStreak": user.max_streak,
    "createdAt": user.created_at,
  })))
}
