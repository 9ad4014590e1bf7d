//! Error types for the challenge API

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("Database error: {0}")]
  Database(#[from] sea_orm::DbErr),

  #[error("Challenge not found")]
  ChallengeNotFound,

  #[error("Not participating in this challenge")]
  ParticipationNotFound,

  #[error("User not found")]
  UserNotFound,

  #[error("Already participating in this challenge")]
  AlreadyJoined,

  #[error("Email already exists")]
  EmailTaken,

  #[error("Invalid credentials")]
  InvalidCredentials,

  #[error("Missing or invalid token")]
  Unauthorized,

  #[error("Access denied")]
  Forbidden,

  #[error("{0}")]
  Validation(String),

  #[error("Internal error: {0}")]
  Internal(String),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = match &self {
      Error::ChallengeNotFound
      | Error::ParticipationNotFound
      | Error::UserNotFound => StatusCode::NOT_FOUND,
      Error::AlreadyJoined | Error::EmailTaken => StatusCode::CONFLICT,
      Error::InvalidCredentials | Error::Unauthorized => {
        StatusCode::UNAUTHORIZED
      }
      Error::Forbidden => StatusCode::FORBIDDEN,
      Error::Validation(_) => StatusCode::BAD_REQUEST,
      Error::Database(_) | Error::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };

    let message = match &self {
      // don't leak internals to API clients
      Error::Database(_) => "Database error".to_string(),
      Error::Internal(_) => "Internal error".to_string(),
      other => other.to_string(),
    };

    let body = json::json!({
      "success": false,
      "error": message
    });

    (status, Json(body)).into_response()
  }
}

pub type Result<T> = std::result::Result<T, Error>;
