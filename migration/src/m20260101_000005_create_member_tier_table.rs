use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MemberTier::Table)
                    .if_not_exists()
                    .col(string(MemberTier::UserId).primary_key())
                    .col(string(MemberTier::Tier))
                    .col(timestamp_with_time_zone(MemberTier::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MemberTier::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum MemberTier {
    Table,
    UserId,
    Tier,
    UpdatedAt,
}
