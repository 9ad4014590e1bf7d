pub use std::sync::Arc;

pub use chrono::{NaiveDate as Date, NaiveDateTime as DateTime, TimeDelta, Utc};
pub use sea_orm::{
  ActiveModelTrait, ColumnTrait, ConnectionTrait, Database,
  DatabaseConnection, EntityTrait, NotSet, PaginatorTrait, QueryFilter,
  QueryOrder, QuerySelect, Set, TransactionTrait,
};
pub use sea_orm_migration::MigratorTrait;
pub use tracing::{debug, error, info, warn};

pub use crate::error::{Error, Result};
