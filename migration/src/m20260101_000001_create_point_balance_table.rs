use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PointBalance::Table)
                    .if_not_exists()
                    .col(string(PointBalance::UserId).primary_key())
                    .col(big_integer(PointBalance::Points).default(0))
                    .col(timestamp_with_time_zone(PointBalance::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Leaderboard scans order by points
        manager
            .create_index(
                Index::create()
                    .name("idx_point_balance_points")
                    .table(PointBalance::Table)
                    .col(PointBalance::Points)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_point_balance_points")
                    .table(PointBalance::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PointBalance::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PointBalance {
    Table,
    UserId,
    Points,
    UpdatedAt,
}
