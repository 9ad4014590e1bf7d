use sea_orm_migration::prelude::*;

use super::m20260110_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .alter_table(
        Table::alter()
          .table(Users::Table)
          .add_column(
            ColumnDef::new(Alias::new("current_streak"))
              .integer()
              .not_null()
              .default(0),
          )
          .to_owned(),
      )
      .await?;

    manager
      .alter_table(
        Table::alter()
          .table(Users::Table)
          .add_column(
            ColumnDef::new(Alias::new("max_streak"))
              .integer()
              .not_null()
              .default(0),
          )
          .to_owned(),
      )
      .await?;

    manager
      .alter_table(
        Table::alter()
          .table(Users::Table)
          .add_column(ColumnDef::new(Alias::new("last_activity_date")).date().null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .alter_table(
        Table::alter()
          .table(Users::Table)
          .drop_column(Alias::new("current_streak"))
          .to_owned(),
      )
      .await?;

    manager
      .alter_table(
        Table::alter()
          .table(Users::Table)
          .drop_column(Alias::new("max_streak"))
          .to_owned(),
      )
      .await?;

    manager
      .alter_table(
        Table::alter()
          .table(Users::Table)
          .drop_column(Alias::new("last_activity_date"))
          .to_owned(),
      )
      .await
  }
}
