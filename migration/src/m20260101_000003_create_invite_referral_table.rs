use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InviteReferral::Table)
                    .if_not_exists()
                    .col(pk_auto(InviteReferral::Id))
                    .col(string(InviteReferral::GuildId))
                    .col(string(InviteReferral::MemberId))
                    .col(string(InviteReferral::InviterId))
                    .col(timestamp_with_time_zone(InviteReferral::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // A member has at most one active referral per guild
        manager
            .create_index(
                Index::create()
                    .name("idx_invite_referral_guild_member")
                    .table(InviteReferral::Table)
                    .col(InviteReferral::GuildId)
                    .col(InviteReferral::MemberId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_invite_referral_guild_inviter")
                    .table(InviteReferral::Table)
                    .col(InviteReferral::GuildId)
                    .col(InviteReferral::InviterId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_invite_referral_guild_inviter")
                    .table(InviteReferral::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_invite_referral_guild_member")
                    .table(InviteReferral::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(InviteReferral::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum InviteReferral {
    Table,
    Id,
    GuildId,
    MemberId,
    InviterId,
    CreatedAt,
}
