use sea_orm_migration::prelude::*;

use super::m20260110_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(ActivityLogs::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(ActivityLogs::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(ActivityLogs::UserId).integer().null())
          .col(ColumnDef::new(ActivityLogs::Action).string_len(100).not_null())
          .col(ColumnDef::new(ActivityLogs::Details).json().null())
          .col(ColumnDef::new(ActivityLogs::IpAddress).string_len(45).null())
          .col(ColumnDef::new(ActivityLogs::UserAgent).string_len(500).null())
          .col(ColumnDef::new(ActivityLogs::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_activity_logs_user")
              .from(ActivityLogs::Table, ActivityLogs::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_activity_logs_user")
          .table(ActivityLogs::Table)
          .col(ActivityLogs::UserId)
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_activity_logs_created")
          .table(ActivityLogs::Table)
          .col(ActivityLogs::CreatedAt)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(ActivityLogs::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum ActivityLogs {
  Table,
  Id,
  UserId,
  Action,
  Details,
  IpAddress,
  UserAgent,
  CreatedAt,
}
