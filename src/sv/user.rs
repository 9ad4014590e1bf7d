//! User accounts - registration, credential checks, admin queries

use serde::Serialize;

use crate::{auth, entity::user, prelude::*};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
  pub total: u64,
  pub active: u64,
  pub blocked: u64,
  pub new_this_week: u64,
}

pub struct User<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> User<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn register(
    &self,
    email: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
  ) -> Result<user::Model> {
    validate_email(email)?;
    validate_name("First name", first_name)?;
    validate_name("Last name", last_name)?;
    if password.len() < 6 {
      return Err(Error::Validation(
        "Password must be at least 6 characters".into(),
      ));
    }

    if self.by_email(email).await?.is_some() {
      return Err(Error::EmailTaken);
    }

    let now = Utc::now().naive_utc();
    let user = user::ActiveModel {
      email: Set(email.to_string()),
      password_hash: Set(auth::hash_password(password)?),
      first_name: Set(first_name.to_string()),
      last_name: Set(last_name.to_string()),
      roles: Set(json::json!([])),
      is_active: Set(true),
      current_streak: Set(0),
      max_streak: Set(0),
      last_activity_date: Set(None),
      created_at: Set(now),
      updated_at: Set(None),
      ..Default::default()
    };

    Ok(user.insert(self.db).await?)
  }

  /// Credential check for login. Blocked accounts fail even with the right
  /// password.
  pub async fn authenticate(
    &self,
    email: &str,
    password: &str,
  ) -> Result<user::Model> {
    let user =
      self.by_email(email).await?.ok_or(Error::InvalidCredentials)?;

    if !auth::verify_password(password, &user.password_hash)? {
      return Err(Error::InvalidCredentials);
    }
    if !user.is_active {
      return Err(Error::Forbidden);
    }

    Ok(user)
  }

  pub async fn by_id(&self, id: i32) -> Result<Option<user::Model>> {
    let user = user::Entity::find_by_id(id).one(self.db).await?;
    Ok(user)
  }

  pub async fn by_email(&self, email: &str) -> Result<Option<user::Model>> {
    let user = user::Entity::find()
      .filter(user::Column::Email.eq(email))
      .one(self.db)
      .await?;
    Ok(user)
  }

  pub async fn all(&self) -> Result<Vec<user::Model>> {
    let users = user::Entity::find()
      .order_by_asc(user::Column::CreatedAt)
      .all(self.db)
      .await?;
    Ok(users)
  }

  /// Flip the active flag (admin block/unblock).
  pub async fn toggle_active(&self, id: i32) -> Result<user::Model> {
    let user = self.by_id(id).await?.ok_or(Error::UserNotFound)?;
    let flipped = !user.is_active;

    let user = user::ActiveModel {
      is_active: Set(flipped),
      updated_at: Set(Some(Utc::now().naive_utc())),
      ..user.into()
    }
    .update(self.db)
    .await?;

    Ok(user)
  }

  /// Dashboard counters for the admin panel.
  pub async fn stats(&self) -> Result<UserStats> {
    let total = user::Entity::find().count(self.db).await?;
    let active = user::Entity::find()
      .filter(user::Column::IsActive.eq(true))
      .count(self.db)
      .await?;
    let week_ago = Utc::now().naive_utc() - TimeDelta::days(7);
    let new_this_week = user::Entity::find()
      .filter(user::Column::CreatedAt.gt(week_ago))
      .count(self.db)
      .await?;

    Ok(UserStats { total, active, blocked: total - active, new_this_week })
  }
}

fn validate_email(email: &str) -> Result<()> {
  let well_formed = email.contains('@')
    && !email.starts_with('@')
    && !email.ends_with('@')
    && email.len() <= 180;
  if !well_formed {
    return Err(Error::Validation("Invalid email format".into()));
  }
  Ok(())
}

fn validate_name(field: &str, value: &str) -> Result<()> {
  let len = value.chars().count();
  if !(2..=100).contains(&len) {
    return Err(Error::Validation(format!(
      "{field} must be between 2 and 100 characters"
    )));
  }
  Ok(())
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

    db
  }

  #[tokio::test]
  async fn test_register_and_authenticate() {
    let db = setup_test_db().await;
    let sv = User::new(&db);

    let user = sv
      .register("jan@example.com", "User123!", "Jan", "Kowalski")
      .await
      .unwrap();
    assert!(user.is_active);
    assert!(!user.is_admin());

    let logged = sv.authenticate("jan@example.com", "User123!").await.unwrap();
    assert_eq!(logged.id, user.id);

    assert!(matches!(
      sv.authenticate("jan@example.com", "nope").await,
      Err(Error::InvalidCredentials)
    ));
    assert!(matches!(
      sv.authenticate("ghost@example.com", "User123!").await,
      Err(Error::InvalidCredentials)
    ));
  }

  #[tokio::test]
  async fn test_register_duplicate_email() {
    let db = setup_test_db().await;
    let sv = User::new(&db);

    sv.register("jan@example.com", "User123!", "Jan", "Kowalski")
      .await
      .unwrap();

    let second =
      sv.register("jan@example.com", "Other123!", "Janek", "Nowak").await;
    assert!(matches!(second, Err(Error::EmailTaken)));
  }

  #[tokio::test]
  async fn test_register_validation() {
    let db = setup_test_db().await;
    let sv = User::new(&db);

    assert!(matches!(
      sv.register("not-an-email", "User123!", "Jan", "Kowalski").await,
      Err(Error::Validation(_))
    ));
    assert!(matches!(
      sv.register("jan@example.com", "User123!", "J", "Kowalski").await,
      Err(Error::Validation(_))
    ));
    assert!(matches!(
      sv.register("jan@example.com", "abc", "Jan", "Kowalski").await,
      Err(Error::Validation(_))
    ));
  }

  #[tokio::test]
  async fn test_blocked_account_cannot_login() {
    let db = setup_test_db().await;
    let sv = User::new(&db);

    let user = sv
      .register("jan@example.com", "User123!", "Jan", "Kowalski")
      .await
      .unwrap();

    let blocked = sv.toggle_active(user.id).await.unwrap();
    assert!(!blocked.is_active);

    assert!(matches!(
      sv.authenticate("jan@example.com", "User123!").await,
      Err(Error::Forbidden)
    ));

    let unblocked = sv.toggle_active(user.id).await.unwrap();
    assert!(unblocked.is_active);
  }
}
