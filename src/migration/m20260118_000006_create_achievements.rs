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
          .table(Achievements::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Achievements::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Achievements::Name).string_len(100).not_null())
          .col(ColumnDef::new(Achievements::Description).text().not_null())
          .col(ColumnDef::new(Achievements::Icon).string_len(255).null())
          .col(
            ColumnDef::new(Achievements::PointsRequired)
              .integer()
              .not_null()
              .default(0),
          )
          .col(ColumnDef::new(Achievements::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(UserAchievements::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(UserAchievements::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(UserAchievements::UserId).integer().not_null())
          .col(
            ColumnDef::new(UserAchievements::AchievementId)
              .integer()
              .not_null(),
          )
          .col(ColumnDef::new(UserAchievements::EarnedAt).date_time().not_null())
          .col(
            ColumnDef::new(UserAchievements::CreatedAt).date_time().not_null(),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_user_achievements_user")
              .from(UserAchievements::Table, UserAchievements::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_user_achievements_achievement")
              .from(UserAchievements::Table, UserAchievements::AchievementId)
              .to(Achievements::Table, Achievements::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(UserAchievements::Table).to_owned())
      .await?;
    manager
      .drop_table(Table::drop().table(Achievements::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum Achievements {
  Table,
  Id,
  Name,
  Description,
  Icon,
  PointsRequired,
  CreatedAt,
}

#[derive(DeriveIden)]
pub enum UserAchievements {
  Table,
  Id,
  UserId,
  AchievementId,
  EarnedAt,
  CreatedAt,
}
