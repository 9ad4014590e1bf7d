//! Cichy Challenge - digital-detox challenge tracker
//!
//! Architecture:
//! - SeaORM for database access (SQLite)
//! - Axum for the HTTP API with JWT auth and rate limiting
//! - Tokio for the async runtime and the background event worker

mod auth;
mod entity;
mod error;
mod events;
mod handlers;
mod migration;
mod prelude;
mod seed;
mod state;
mod sv;

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_governor::GovernorLayer;
use tower_governor::governor::GovernorConfigBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::prelude::*;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  // Initialize tracing
  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "cichy_challenge=debug,tower_http=debug,axum=trace,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  // Load configuration from environment
  let db_url = env::var("DATABASE_URL")
    .unwrap_or_else(|_| "sqlite:cichy.db?mode=rwc".into());
  let secret = env::var("JWT_SECRET").context("JWT_SECRET not set")?;

  info!("Starting Cichy Challenge v{}", env!("CARGO_PKG_VERSION"));

  // Initialize application state
  let app_state = Arc::new(AppState::new(&db_url, secret).await?);
  seed::run(&app_state.db).await?;

  // Configure rate limiting (100 requests per minute per IP)
  let governor_conf = Arc::new(
    GovernorConfigBuilder::default()
      .per_second(2)
      .burst_size(100)
      .finish()
      .context("Failed to build rate limiter config")?,
  );

  let governor_limiter = governor_conf.limiter().clone();

  // Spawn rate limiter cleanup task
  tokio::spawn(async move {
    loop {
      tokio::time::sleep(Duration::from_secs(60)).await;
      governor_limiter.retain_recent();
    }
  });

  // Build router with middleware
  let app = Router::new()
    // Auth
    .route("/api/auth/register", post(handlers::auth::register))
    .route("/api/auth/login", post(handlers::auth::login))
    .route("/api/auth/me", get(handlers::auth::me))
    // Challenge catalog & lifecycle
    .route("/api/challenges", get(handlers::challenges::list))
    .route("/api/challenges/{id}", get(handlers::challenges::show))
    .route("/api/challenges/{id}/join", post(handlers::challenges::join))
    .route("/api/challenges/{id}/leave", post(handlers::challenges::leave))
    .route(
      "/api/challenges/{id}/complete",
      post(handlers::challenges::complete),
    )
    .route(
      "/api/challenges/{id}/progress",
      post(handlers::challenges::set_progress),
    )
    // Progress dashboard
    .route("/api/progress", get(handlers::progress::summary))
    .route("/api/progress/history", get(handlers::progress::history))
    // Leaderboard & streaks
    .route("/api/leaderboard", get(handlers::leaderboard::index))
    .route("/api/leaderboard/checkin", post(handlers::leaderboard::check_in))
    .route("/api/leaderboard/streak", get(handlers::leaderboard::streak))
    // Quotes
    .route("/api/quotes/random", get(handlers::quotes::random))
    .route("/api/quotes", get(handlers::quotes::list))
    // Admin panel
    .route("/api/admin/stats", get(handlers::admin::stats))
    .route("/api/admin/users", get(handlers::admin::users))
    .route("/api/admin/users/{id}/toggle", post(handlers::admin::toggle_user))
    .route("/api/admin/logs", get(handlers::admin::logs))
    .route("/health", get(handlers::health))
    // Middleware
    .layer(
      ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(GovernorLayer::new(governor_conf))
        .layer(
          CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        ),
    )
    .with_state(app_state);

  // Start HTTP server
  let port: u16 = env::var("PORT")
    .ok()
    .and_then(|p| p.parse().ok())
    .unwrap_or(3000);
  let addr = SocketAddr::from(([0, 0, 0, 0], port));

  info!("HTTP server listening on {}", addr);

  let listener = tokio::net::TcpListener::bind(addr)
    .await
    .context("Failed to bind")?;
  axum::serve(
    listener,
    app.into_make_service_with_connect_info::<SocketAddr>(),
  )
  .await
  .context("Server error")?;

  Ok(())
}
