use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Users::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Users::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            ColumnDef::new(Users::Email)
              .string_len(180)
              .not_null()
              .unique_key(),
          )
          .col(ColumnDef::new(Users::PasswordHash).string().not_null())
          .col(ColumnDef::new(Users::FirstName).string_len(100).not_null())
          .col(ColumnDef::new(Users::LastName).string_len(100).not_null())
          .col(ColumnDef::new(Users::Roles).json().not_null())
          .col(
            ColumnDef::new(Users::IsActive).boolean().not_null().default(true),
          )
          .col(ColumnDef::new(Users::CreatedAt).date_time().not_null())
          .col(ColumnDef::new(Users::UpdatedAt).date_time().null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Users {
  Table,
  Id,
  Email,
  PasswordHash,
  FirstName,
  LastName,
  Roles,
  IsActive,
  CreatedAt,
  UpdatedAt,
}
