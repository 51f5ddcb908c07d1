use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DailyClaim::Table)
                    .if_not_exists()
                    .col(string(DailyClaim::UserId).primary_key())
                    .col(timestamp_with_time_zone(DailyClaim::LastClaimedAt))
                    .col(integer(DailyClaim::Streak).default(1))
                    .col(integer(DailyClaim::BestStreak).default(1))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DailyClaim::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum DailyClaim {
    Table,
    UserId,
    LastClaimedAt,
    Streak,
    BestStreak,
}
