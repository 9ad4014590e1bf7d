use sea_orm_migration::prelude::*;

use super::m20260110_000001_create_users::Users;
use super::m20260110_000002_create_challenges::Challenges;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Participations::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Participations::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Participations::UserId).integer().not_null())
          .col(ColumnDef::new(Participations::ChallengeId).integer().not_null())
          .col(
            ColumnDef::new(Participations::Status)
              .string_len(20)
              .not_null()
              .default("in_progress"),
          )
          .col(
            ColumnDef::new(Participations::Progress)
              .integer()
              .not_null()
              .default(0),
          )
          .col(ColumnDef::new(Participations::StartDate).date_time().not_null())
          .col(ColumnDef::new(Participations::EndDate).date_time().not_null())
          .col(ColumnDef::new(Participations::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_participations_user")
              .from(Participations::Table, Participations::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_participations_challenge")
              .from(Participations::Table, Participations::ChallengeId)
              .to(Challenges::Table, Challenges::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    // lookup path for "active participation by (user, challenge)"; the
    // at-most-one-active rule itself is enforced transactionally on join
    manager
      .create_index(
        Index::create()
          .name("idx_participations_user_challenge")
          .table(Participations::Table)
          .col(Participations::UserId)
          .col(Participations::ChallengeId)
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_participations_user_status")
          .table(Participations::Table)
          .col(Participations::UserId)
          .col(Participations::Status)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(Participations::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum Participations {
  Table,
  Id,
  UserId,
  ChallengeId,
  Status,
  Progress,
  StartDate,
  EndDate,
  CreatedAt,
}
