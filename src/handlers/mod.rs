//! HTTP layer - thin handlers mapping routes onto the service layer
//!
//! Responses are camelCase JSON throughout; errors bubble up as
//! `crate::Error` and get their status in `IntoResponse`.

use axum::http::{HeaderMap, header};

pub mod admin;
pub mod auth;
pub mod challenges;
pub mod leaderboard;
pub mod progress;
pub mod quotes;

pub async fn health() -> &'static str {
  "OK"
}

pub(crate) fn user_agent(headers: &HeaderMap) -> Option<String> {
  headers
    .get(header::USER_AGENT)
    .and_then(|value| value.to_str().ok())
    .map(str::to_string)
}
