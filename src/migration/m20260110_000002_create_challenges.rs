use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Challenges::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Challenges::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Challenges::Title).string_len(255).not_null())
          .col(ColumnDef::new(Challenges::Description).text().not_null())
          .col(
            ColumnDef::new(Challenges::DurationDays)
              .integer()
              .not_null()
              .default(1),
          )
          .col(
            ColumnDef::new(Challenges::Difficulty)
              .string_len(20)
              .not_null()
              .default("easy"),
          )
          .col(ColumnDef::new(Challenges::Points).integer().not_null().default(0))
          .col(ColumnDef::new(Challenges::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Challenges::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Challenges {
  Table,
  Id,
  Title,
  Description,
  DurationDays,
  Difficulty,
  Points,
  CreatedAt,
}
