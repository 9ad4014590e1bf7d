//! Database migrations using SeaORM

use sea_orm_migration::prelude::*;

mod m20260110_000001_create_users;
mod m20260110_000002_create_challenges;
mod m20260110_000003_create_participations;
mod m20260110_000004_create_activity_logs;
mod m20260112_000005_create_quotes;
mod m20260118_000006_create_achievements;
mod m20260125_000007_add_streaks;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20260110_000001_create_users::Migration),
      Box::new(m20260110_000002_create_challenges::Migration),
      Box::new(m20260110_000003_create_participations::Migration),
      Box::new(m20260110_000004_create_activity_logs::Migration),
      Box::new(m20260112_000005_create_quotes::Migration),
      Box::new(m20260118_000006_create_achievements::Migration),
      Box::new(m20260125_000007_add_streaks::Migration),
    ]
  }
}
