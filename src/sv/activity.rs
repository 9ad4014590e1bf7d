//! Activity log writes and admin queries
//!
//! Inserts happen on the event worker, never on the request path.

use json::Value;

use crate::{entity::activity_log, entity::user, prelude::*};

pub struct Activity<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Activity<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn record(
    &self,
    user_id: Option<i32>,
    action: &str,
    details: Option<Value>,
    ip_address: Option<String>,
    user_agent: Option<String>,
  ) -> Result<activity_log::Model> {
    let log = activity_log::ActiveModel {
      user_id: Set(user_id),
      action: Set(action.to_string()),
      details: Set(details),
      ip_address: Set(ip_address),
      user_agent: Set(user_agent),
      created_at: Set(Utc::now().naive_utc()),
      ..Default::default()
    };

    Ok(log.insert(self.db).await?)
  }

  pub async fn recent(
    &self,
    limit: u64,
  ) -> Result<Vec<(activity_log::Model, Option<user::Model>)>> {
    let logs = activity_log::Entity::find()
      .order_by_desc(activity_log::Column::CreatedAt)
      .limit(limit)
      .find_also_related(user::Entity)
      .all(self.db)
      .await?;
    Ok(logs)
  }
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
  async fn test_record_anonymous_action() {
    let db = setup_test_db().await;
    let sv = Activity::new(&db);

    let log = sv
      .record(
        None,
        "login_failed",
        Some(json::json!({ "email": "ghost@example.com" })),
        Some("127.0.0.1".to_string()),
        None,
      )
      .await
      .unwrap();

    assert_eq!(log.user_id, None);
    assert_eq!(log.action, "login_failed");

    let recent = sv.recent(10).await.unwrap();
    assert_eq!(recent.len(), 1);
  }
}
