use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Quotes::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Quotes::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Quotes::Content).text().not_null())
          .col(ColumnDef::new(Quotes::Author).string_len(255).null())
          .col(
            ColumnDef::new(Quotes::Category)
              .string_len(50)
              .not_null()
              .default("motivation"),
          )
          .col(ColumnDef::new(Quotes::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Quotes::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Quotes {
  Table,
  Id,
  Content,
  Author,
  Category,
  CreatedAt,
}
