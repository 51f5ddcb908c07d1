use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InviteReward::Table)
                    .if_not_exists()
                    .col(pk_auto(InviteReward::Id))
                    .col(string(InviteReward::GuildId))
                    .col(string(InviteReward::MemberId))
                    .col(string(InviteReward::InviterId))
                    .col(timestamp_with_time_zone(InviteReward::RewardedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_invite_reward_guild_member")
                    .table(InviteReward::Table)
                    .col(InviteReward::GuildId)
                    .col(InviteReward::MemberId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_invite_reward_guild_member")
                    .table(InviteReward::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(InviteReward::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum InviteReward {
    Table,
    Id,
    GuildId,
    MemberId,
    InviterId,
    RewardedAt,
}
