//! Fire-and-forget event dispatch
//!
//! Handlers drop events onto an unbounded channel and move on; a worker
//! task owns the slow side (welcome emails, audit-log inserts) and retries
//! failed events a few times on its own. Nothing here can fail the
//! triggering request, and duplicate deliveries only cost a duplicate log
//! row.

use json::Value;
use tokio::sync::mpsc;

use crate::{prelude::*, sv};

const MAX_ATTEMPTS: u32 = 3;
const RETRY_DELAY: std::time::Duration = std::time::Duration::from_secs(1);

#[derive(Debug, Clone)]
pub enum Event {
  UserRegistered {
    user_id: i32,
  },
  Activity {
    user_id: Option<i32>,
    action: String,
    details: Option<Value>,
    ip_address: Option<String>,
    user_agent: Option<String>,
  },
}

#[derive(Clone)]
pub struct EventSink {
  tx: mpsc::UnboundedSender<Event>,
}

impl EventSink {
  pub fn dispatch(&self, event: Event) {
    if self.tx.send(event).is_err() {
      warn!("Event worker is gone, dropping event");
    }
  }

  pub fn activity(
    &self,
    user_id: Option<i32>,
    action: &str,
    details: Option<Value>,
    ip_address: Option<String>,
    user_agent: Option<String>,
  ) {
    self.dispatch(Event::Activity {
      user_id,
      action: action.to_string(),
      details,
      ip_address,
      user_agent,
    });
  }
}

pub fn spawn_worker(db: DatabaseConnection) -> EventSink {
  let (tx, rx) = mpsc::unbounded_channel();
  tokio::spawn(run(db, rx));
  EventSink { tx }
}

async fn run(db: DatabaseConnection, mut rx: mpsc::UnboundedReceiver<Event>) {
  while let Some(event) = rx.recv().await {
    for attempt in 1..=MAX_ATTEMPTS {
      match handle(&db, &event).await {
        Ok(()) => break,
        Err(err) if attempt < MAX_ATTEMPTS => {
          warn!("Event handling failed (attempt {attempt}): {err}");
          tokio::time::sleep(RETRY_DELAY).await;
        }
        Err(err) => {
          error!("Dropping event after {MAX_ATTEMPTS} attempts: {err}");
        }
      }
    }
  }

  info!("Event channel closed, worker exiting");
}

async fn handle(db: &DatabaseConnection, event: &Event) -> Result<()> {
  match event {
    Event::UserRegistered { user_id } => {
      // fetch fresh data, the account may have changed since dispatch
      let Some(user) = sv::User::new(db).by_id(*user_id).await? else {
        warn!("User {user_id} not found, skipping welcome email");
        return Ok(());
      };

      let body = welcome_email(&user.first_name);
      info!(
        user_id = user.id,
        email = %user.email,
        "Sending welcome email ({} bytes)",
        body.len()
      );
      Ok(())
    }
    Event::Activity { user_id, action, details, ip_address, user_agent } => {
      debug!("Logging activity '{action}'");
      sv::Activity::new(db)
        .record(
          *user_id,
          action,
          details.clone(),
          ip_address.clone(),
          user_agent.clone(),
        )
        .await?;
      Ok(())
    }
  }
}

fn welcome_email(first_name: &str) -> String {
  format!(
    "Hi {first_name}!\n\n\
     Thanks for joining Cichy Challenge, the digital-detox tracker.\n\
     You can now join challenges, track your progress and earn badges.\n\n\
     Ready for the first step? See you offline,\n\
     The Cichy Challenge team"
  )
}

#[cfg(test)]
mod tests {
  use sea_orm::{ConnectionTrait, Database, DbBackend, Schema};

  use super::*;
  use crate::entity::*;

  async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();

    let schema = Schema::new(DbBackend::Sqlite);

    let stmt = schema.create_table_from_entity(user::Entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    let stmt = schema.create_table_from_entity(activity_log::Entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();

    db
  }

  #[tokio::test]
  async fn test_activity_event_writes_log_row() {
    let db = setup_test_db().await;

    let event = Event::Activity {
      user_id: None,
      action: "login_failed".to_string(),
      details: Some(json::json!({ "email": "ghost@example.com" })),
      ip_address: Some("10.0.0.1".to_string()),
      user_agent: None,
    };

    handle(&db, &event).await.unwrap();

    let logs = sv::Activity::new(&db).recent(10).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].0.action, "login_failed");
  }

  #[tokio::test]
  async fn test_welcome_email_for_missing_user_is_skipped() {
    let db = setup_test_db().await;

    // must not error, the worker would retry otherwise
    handle(&db, &Event::UserRegistered { user_id: 404 }).await.unwrap();
  }
}
