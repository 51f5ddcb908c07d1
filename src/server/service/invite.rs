//! Invite tracking.
//!
//! Discord does not say which invite a member used, so the bot keeps a cache of every
//! guild's invite use counts and compares it with a fresh listing when someone joins.
//! A resolved join records the referral, counts toward the inviter's `invites` quests
//! and pays the invite reward once per member per guild.

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use tokio::sync::RwLock;

use crate::server::{
    data::{invite::InviteRepository, points::PointsRepository},
    error::AppError,
    model::{
        invite::{find_used_invite, InviteJoin, InviteLeave, InviteSnapshot, InviterCount},
        quest_event::{QuestEvent, QuestTrigger},
    },
    service::quest::QuestLedger,
};

/// One invite as last listed by Discord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedInvite {
    pub code: String,
    pub uses: u64,
    /// Owner of the invite; `None` for vanity and widget invites.
    pub inviter_id: Option<u64>,
}

/// Last known invites of every guild, keyed by guild then invite code.
#[derive(Clone, Default)]
pub struct InviteCache {
    guilds: Arc<RwLock<HashMap<u64, HashMap<String, CachedInvite>>>>,
}

impl InviteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces a guild's cached invites with a fresh listing.
    pub async fn replace(&self, guild_id: u64, invites: Vec<CachedInvite>) {
        let invites = invites
            .into_iter()
            .map(|invite| (invite.code.clone(), invite))
            .collect();

        self.guilds.write().await.insert(guild_id, invites);
    }

    pub async fn insert(&self, guild_id: u64, invite: CachedInvite) {
        self.guilds
            .write()
            .await
            .entry(guild_id)
            .or_default()
            .insert(invite.code.clone(), invite);
    }

    pub async fn remove(&self, guild_id: u64, code: &str) {
        if let Some(invites) = self.guilds.write().await.get_mut(&guild_id) {
            invites.remove(code);
        }
    }

    /// Works out who invited a member who just joined, then caches `fresh`.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the member joined
    /// - `fresh` - The guild's invites listed right after the join
    ///
    /// # Returns
    /// - `Some(inviter_id)` - Owner of the invite whose use count went up, or of a used
    ///   invite that disappeared
    /// - `None` - No invite could be singled out
    pub async fn resolve_join(&self, guild_id: u64, fresh: Vec<CachedInvite>) -> Option<u64> {
        let mut guilds = self.guilds.write().await;
        let before = guilds.remove(&guild_id).unwrap_or_default();

        let after: HashMap<String, CachedInvite> = fresh
            .into_iter()
            .map(|invite| (invite.code.clone(), invite))
            .collect();

        let code = find_used_invite(&snapshot(&before), &snapshot(&after));
        let inviter_id = code.and_then(|code| {
            after
                .get(&code)
                .or_else(|| before.get(&code))
                .and_then(|invite| invite.inviter_id)
        });

        guilds.insert(guild_id, after);

        inviter_id
    }
}

fn snapshot(invites: &HashMap<String, CachedInvite>) -> InviteSnapshot {
    invites
        .iter()
        .map(|(code, invite)| (code.clone(), invite.uses))
        .collect()
}

pub struct InviteService<'a> {
    db: &'a DatabaseConnection,
    ledger: &'a QuestLedger,
    reward_points: i64,
}

impl<'a> InviteService<'a> {
    pub fn new(db: &'a DatabaseConnection, ledger: &'a QuestLedger, reward_points: i64) -> Self {
        Self {
            db,
            ledger,
            reward_points,
        }
    }

    /// Records a member joining through an invite.
    ///
    /// Quest progress failures are logged and do not fail the join.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the member joined
    /// - `member_id` - Discord ID of the new member
    /// - `inviter_id` - Resolved inviter, if any
    /// - `now` - Join instant
    ///
    /// # Returns
    /// - `Ok(Some(InviteJoin))` - Referral recorded
    /// - `Ok(None)` - No inviter, or the member used their own invite
    /// - `Err(AppError)` - Database error
    pub async fn member_joined(
        &self,
        guild_id: u64,
        member_id: u64,
        inviter_id: Option<u64>,
        now: DateTime<Utc>,
    ) -> Result<Option<InviteJoin>, AppError> {
        let Some(inviter_id) = inviter_id.filter(|inviter| *inviter != member_id) else {
            return Ok(None);
        };

        let repo = InviteRepository::new(self.db);
        repo.record_referral(guild_id, member_id, inviter_id, now)
            .await?;

        let event = QuestEvent::new(guild_id, inviter_id, now, QuestTrigger::InviteAccepted);
        if let Err(e) = self.ledger.ingest(event).await {
            tracing::error!(
                "Failed to record invite quest progress for user {}: {}",
                inviter_id,
                e
            );
        }

        let rewarded_total = if self.reward_points > 0
            && repo
                .record_reward(guild_id, member_id, inviter_id, now)
                .await?
        {
            Some(
                PointsRepository::new(self.db)
                    .add(inviter_id, self.reward_points)
                    .await?,
            )
        } else {
            None
        };

        let invite_count = repo.invite_count(guild_id, inviter_id).await?;

        tracing::info!(
            "Member {} joined guild {} through an invite of {} ({} invites)",
            member_id,
            guild_id,
            inviter_id,
            invite_count
        );

        Ok(Some(InviteJoin {
            inviter_id,
            invite_count,
            rewarded_total,
        }))
    }

    /// Drops the referral of a member who left.
    ///
    /// The invite reward already paid is kept.
    pub async fn member_left(
        &self,
        guild_id: u64,
        member_id: u64,
    ) -> Result<Option<InviteLeave>, AppError> {
        let repo = InviteRepository::new(self.db);

        let Some(referral) = repo.remove_referral(guild_id, member_id).await? else {
            return Ok(None);
        };
        let invite_count = repo.invite_count(guild_id, referral.inviter_id).await?;

        Ok(Some(InviteLeave {
            inviter_id: referral.inviter_id,
            invite_count,
        }))
    }

    pub async fn invite_count(&self, guild_id: u64, inviter_id: u64) -> Result<u64, AppError> {
        Ok(InviteRepository::new(self.db)
            .invite_count(guild_id, inviter_id)
            .await?)
    }

    pub async fn top_inviters(
        &self,
        guild_id: u64,
        limit: usize,
    ) -> Result<Vec<InviterCount>, AppError> {
        Ok(InviteRepository::new(self.db)
            .top_inviters(guild_id, limit)
            .await?)
    }
}
