//! Invite tracking data repository.
//!
//! This module provides the `InviteRepository` for referral records (who brought which
//! member into a guild) and reward records (which members already paid their inviter).
//! A referral disappears when the member leaves; a reward record never does, so a member
//! who leaves and rejoins cannot farm the invite reward.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    ModelTrait, PaginatorTrait, QueryFilter, TransactionTrait,
};

use crate::server::model::invite::{InviteReferral, InviterCount};

/// Repository providing database operations for invite referrals and rewards.
pub struct InviteRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> InviteRepository<'a> {
    /// Creates a new InviteRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `InviteRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records that `member_id` joined `guild_id` through `inviter_id`'s invite.
    ///
    /// Replaces any referral still stored for the member in that guild.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `member_id` - Discord ID of the member who joined
    /// - `inviter_id` - Discord ID of the invite's owner
    /// - `now` - Join instant
    ///
    /// # Returns
    /// - `Ok(InviteReferral)` - The stored referral
    /// - `Err(DbErr)` - Database error during insert
    pub async fn record_referral(
        &self,
        guild_id: u64,
        member_id: u64,
        inviter_id: u64,
        now: DateTime<Utc>,
    ) -> Result<InviteReferral, DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::InviteReferral::delete_many()
            .filter(entity::invite_referral::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::invite_referral::Column::MemberId.eq(member_id.to_string()))
            .exec(&txn)
            .await?;

        let entity = entity::invite_referral::ActiveModel {
            id: ActiveValue::NotSet,
            guild_id: ActiveValue::Set(guild_id.to_string()),
            member_id: ActiveValue::Set(member_id.to_string()),
            inviter_id: ActiveValue::Set(inviter_id.to_string()),
            created_at: ActiveValue::Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        InviteReferral::from_entity(entity)
    }

    /// Removes the referral of a member who left.
    ///
    /// # Returns
    /// - `Ok(Some(InviteReferral))` - The referral that was removed
    /// - `Ok(None)` - The member had no recorded inviter
    /// - `Err(DbErr)` - Database error during delete
    pub async fn remove_referral(
        &self,
        guild_id: u64,
        member_id: u64,
    ) -> Result<Option<InviteReferral>, DbErr> {
        let Some(entity) = entity::prelude::InviteReferral::find()
            .filter(entity::invite_referral::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::invite_referral::Column::MemberId.eq(member_id.to_string()))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let referral = InviteReferral::from_entity(entity.clone())?;
        entity.delete(self.db).await?;

        Ok(Some(referral))
    }

    /// Counts the active referrals of an inviter in a guild.
    pub async fn invite_count(&self, guild_id: u64, inviter_id: u64) -> Result<u64, DbErr> {
        entity::prelude::InviteReferral::find()
            .filter(entity::invite_referral::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::invite_referral::Column::InviterId.eq(inviter_id.to_string()))
            .count(self.db)
            .await
    }

    /// Gets the inviters with the most active referrals in a guild.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `limit` - Maximum number of entries
    ///
    /// # Returns
    /// - `Ok(Vec<InviterCount>)` - Inviters by descending count, ties by inviter ID
    /// - `Err(DbErr)` - Database error during query or a stored ID failed to parse
    pub async fn top_inviters(
        &self,
        guild_id: u64,
        limit: usize,
    ) -> Result<Vec<InviterCount>, DbErr> {
        let referrals = entity::prelude::InviteReferral::find()
            .filter(entity::invite_referral::Column::GuildId.eq(guild_id.to_string()))
            .all(self.db)
            .await?;

        let mut counts: HashMap<u64, u64> = HashMap::new();
        for referral in referrals {
            let referral = InviteReferral::from_entity(referral)?;
            *counts.entry(referral.inviter_id).or_default() += 1;
        }

        let mut ranked: Vec<InviterCount> = counts
            .into_iter()
            .map(|(inviter_id, count)| InviterCount { inviter_id, count })
            .collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count).then(a.inviter_id.cmp(&b.inviter_id)));
        ranked.truncate(limit);

        Ok(ranked)
    }

    /// Records that a member's join paid its inviter, unless it already did.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `member_id` - Discord ID of the member who joined
    /// - `inviter_id` - Discord ID of the inviter being paid
    /// - `now` - Reward instant
    ///
    /// # Returns
    /// - `Ok(true)` - First reward for this member in this guild; pay out
    /// - `Ok(false)` - This member already paid an inviter before
    /// - `Err(DbErr)` - Database error during query or insert
    pub async fn record_reward(
        &self,
        guild_id: u64,
        member_id: u64,
        inviter_id: u64,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        let existing = entity::prelude::InviteReward::find()
            .filter(entity::invite_reward::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::invite_reward::Column::MemberId.eq(member_id.to_string()))
            .count(&txn)
            .await?;

        if existing > 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        entity::invite_reward::ActiveModel {
            id: ActiveValue::NotSet,
            guild_id: ActiveValue::Set(guild_id.to_string()),
            member_id: ActiveValue::Set(member_id.to_string()),
            inviter_id: ActiveValue::Set(inviter_id.to_string()),
            rewarded_at: ActiveValue::Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        Ok(true)
    }
}
