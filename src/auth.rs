//! Authentication: argon2 password hashing, JWT issuance and the axum
//! extractors that turn a bearer token into an acting user.

use argon2::{
  Argon2,
  password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    rand_core::OsRng,
  },
};
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use jsonwebtoken::{
  DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use serde::{Deserialize, Serialize};

use crate::{entity::user, prelude::*, state::AppState};

pub fn hash_password(password: &str) -> Result<String> {
  let salt = SaltString::generate(&mut OsRng);

  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|err| Error::Internal(format!("Failed to hash password: {err}")))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
  let parsed = PasswordHash::new(hash).map_err(|err| {
    Error::Internal(format!("Invalid password hash format: {err}"))
  })?;

  Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
  /// user id
  pub sub: i32,
  pub email: String,
  pub roles: Vec<String>,
  pub iat: i64,
  pub exp: i64,
}

impl Claims {
  pub fn new(user: &user::Model, ttl_hours: i64) -> Self {
    let now = Utc::now();
    Self {
      sub: user.id,
      email: user.email.clone(),
      roles: user.role_names(),
      iat: now.timestamp(),
      exp: (now + TimeDelta::hours(ttl_hours)).timestamp(),
    }
  }
}

pub fn issue_token(claims: &Claims, secret: &str) -> Result<String> {
  encode(
    &Header::default(),
    claims,
    &EncodingKey::from_secret(secret.as_bytes()),
  )
  .map_err(|err| Error::Internal(format!("Failed to sign token: {err}")))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims> {
  decode::<Claims>(
    token,
    &DecodingKey::from_secret(secret.as_bytes()),
    &Validation::default(),
  )
  .map(|data| data.claims)
  .map_err(|_| Error::Unauthorized)
}

/// The authenticated caller, loaded fresh from the database so a blocked
/// account locks out immediately even with a valid token.
pub struct AuthUser(pub user::Model);

impl FromRequestParts<Arc<AppState>> for AuthUser {
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &Arc<AppState>,
  ) -> Result<Self> {
    let header = parts
      .headers
      .get(header::AUTHORIZATION)
      .and_then(|value| value.to_str().ok())
      .ok_or(Error::Unauthorized)?;

    let token = header.strip_prefix("Bearer ").ok_or(Error::Unauthorized)?;
    let claims = decode_token(token, &state.secret)?;

    let user = state
      .sv()
      .user
      .by_id(claims.sub)
      .await?
      .ok_or(Error::Unauthorized)?;

    if !user.is_active {
      return Err(Error::Forbidden);
    }

    Ok(AuthUser(user))
  }
}

pub struct AdminUser(pub user::Model);

impl FromRequestParts<Arc<AppState>> for AdminUser {
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &Arc<AppState>,
  ) -> Result<Self> {
    let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

    if !user.is_admin() {
      return Err(Error::Forbidden);
    }

    Ok(AdminUser(user))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn test_user() -> user::Model {
    user::Model {
      id: 7,
      email: "jan@example.com".to_string(),
      password_hash: String::new(),
      first_name: "Jan".to_string(),
      last_name: "Kowalski".to_string(),
      roles: json::json!(["ROLE_ADMIN"]),
      is_active: true,
      current_streak: 0,
      max_streak: 0,
      last_activity_date: None,
      created_at: Utc::now().naive_utc(),
      updated_at: None,
    }
  }

  #[test]
  fn test_hash_and_verify() {
    let hash = hash_password("User123!").unwrap();

    assert!(hash.starts_with("$argon2"));
    assert!(verify_password("User123!", &hash).unwrap());
    assert!(!verify_password("wrong", &hash).unwrap());
  }

  #[test]
  fn test_token_round_trip() {
    let user = test_user();
    let claims = Claims::new(&user, 24);
    let token = issue_token(&claims, "test-secret").unwrap();

    let decoded = decode_token(&token, "test-secret").unwrap();
    assert_eq!(decoded.sub, 7);
    assert_eq!(decoded.email, "jan@example.com");
    assert!(decoded.roles.contains(&"ROLE_USER".to_string()));
    assert!(decoded.roles.contains(&"ROLE_ADMIN".to_string()));

    assert!(matches!(
      decode_token(&token, "other-secret"),
      Err(Error::Unauthorized)
    ));
  }
}
