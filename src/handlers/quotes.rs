//! Motivational quotes

use axum::{Json, extract::State};
use json::{Value, json};

use crate::{auth::AuthUser, prelude::*, state::AppState};

pub async fn random(
  State(app): State<Arc<AppState>>,
  AuthUser(_): AuthUser,
) -> Result<Json<Value>> {
  let quote = app.sv().quote.random().await?;

  Ok(Json(match quote {
    Some(quote) => json!({
      "content": quote.content,
      "author": quote.author,
      "category": quote.category,
    }),
    None => json!({
      "content": "No quotes available",
      "author": null,
      "category": null,
    }),
  }))
}

pub async fn list(
  State(app): State<Arc<AppState>>,
  AuthUser(_): AuthUser,
) -> Result<Json<Value>> {
  let quotes = app.sv().quote.all().await?;
  Ok(Json(json!(quotes)))
}
