use anyhow::Context;

use crate::{
  events::{self, EventSink},
  migration::Migrator,
  prelude::*,
  sv,
};

#[derive(Debug, Clone)]
pub struct Config {
  pub leaderboard_size: usize,
  pub token_ttl_hours: i64,
}

impl Default for Config {
  fn default() -> Self {
    Self { leaderboard_size: 10, token_ttl_hours: 24 }
  }
}

pub struct Services<'a> {
  pub user: sv::User<'a>,
  pub challenge: sv::Challenge<'a>,
  pub participation: sv::Participation<'a>,
  pub streak: sv::Streak<'a>,
  pub scoring: sv::Scoring<'a>,
  pub activity: sv::Activity<'a>,
  pub quote: sv::Quote<'a>,
  pub achievement: sv::Achievement<'a>,
}

pub struct AppState {
  pub db: DatabaseConnection,
  pub secret: String,
  pub config: Config,
  pub events: EventSink,
}

impl AppState {
  pub async fn new(db_url: &str, secret: String) -> anyhow::Result<Self> {
    Self::with_config(db_url, secret, Config::default()).await
  }

  pub async fn with_config(
    db_url: &str,
    secret: String,
    config: Config,
  ) -> anyhow::Result<Self> {
    info!("Connecting to database...");
    let db = Database::connect(db_url)
      .await
      .context("Failed to connect to database")?;

    info!("Running migrations...");
    Migrator::up(&db, None).await.context("Failed to run migrations")?;

    let events = events::spawn_worker(db.clone());

    Ok(Self { db, secret, config, events })
  }

  pub fn sv(&self) -> Services<'_> {
    Services {
      user: sv::User::new(&self.db),
      challenge: sv::Challenge::new(&self.db),
      participation: sv::Participation::new(&self.db),
      streak: sv::Streak::new(&self.db),
      scoring: sv::Scoring::new(&self.db),
      activity: sv::Activity::new(&self.db),
      quote: sv::Quote::new(&self.db),
      achievement: sv::Achievement::new(&self.db),
    }
  }
}
