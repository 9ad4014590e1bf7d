//! Motivational quotes

use sea_orm::Order;
use sea_orm::sea_query::Expr;

use crate::{entity::quote, prelude::*};

pub struct Quote<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Quote<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// One random quote, or `None` when the table is empty.
  pub async fn random(&self) -> Result<Option<quote::Model>> {
    let quote = quote::Entity::find()
      .order_by(Expr::cust("RANDOM()"), Order::Asc)
      .one(self.db)
      .await?;
    Ok(quote)
  }

  pub async fn all(&self) -> Result<Vec<quote::Model>> {
    let quotes = quote::Entity::find().all(self.db).await?;
    Ok(quotes)
  }

  pub async fn count(&self) -> Result<u64> {
    Ok(quote::Entity::find().count(self.db).await?)
  }
}
