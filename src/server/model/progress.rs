//! Quest progress tree.
//!
//! The whole ledger is one nested map persisted as a single document:
//! bucket → period key → guild id → user id → quest key → `{progress, claimed}`, with a
//! sibling `__assigned` list per user for daily/weekly periods. Old periods are never
//! closed; they stay in the tree as history until an admin reset removes them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::server::model::quest::{Bucket, QuestDefinition};

/// Progress of one user on one quest within one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub progress: u32,
    pub claimed: u32,
}

impl ProgressEntry {
    /// Adds `amount` to the progress, clamped to `target`.
    ///
    /// # Returns
    /// - `true` - Progress changed
    /// - `false` - Already at target or `amount` was zero
    pub fn advance(&mut self, amount: u32, target: u32) -> bool {
        let next = self.progress.saturating_add(amount).min(target);
        let changed = next != self.progress;
        self.progress = next;
        changed
    }

    /// Sets the progress straight to `target` for one-shot completions.
    pub fn complete(&mut self, target: u32) -> bool {
        let changed = self.progress != target;
        self.progress = target;
        changed
    }

    pub fn is_complete(&self, target: u32) -> bool {
        self.progress >= target
    }

    /// Whether the quest is complete and still has an unclaimed reward this period.
    pub fn can_claim(&self, quest: &QuestDefinition) -> bool {
        self.is_complete(quest.target) && self.claimed < quest.max_claims_per_reset
    }
}

/// Everything recorded for one user in one (bucket, period, guild).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    /// Quest keys drawn for this user this period; always `None` for lifetime.
    #[serde(
        rename = "__assigned",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned: Option<Vec<String>>,
    #[serde(flatten)]
    pub quests: BTreeMap<String, ProgressEntry>,
}

impl UserProgress {
    pub fn entry(&self, quest_key: &str) -> ProgressEntry {
        self.quests.get(quest_key).copied().unwrap_or_default()
    }

    /// Fetches or creates the progress entry for a quest.
    pub fn entry_mut(&mut self, quest_key: &str) -> &mut ProgressEntry {
        self.quests.entry(quest_key.to_string()).or_default()
    }
}

/// user id → progress
pub type GuildProgress = BTreeMap<u64, UserProgress>;
/// guild id → users
pub type PeriodProgress = BTreeMap<u64, GuildProgress>;
/// period key → guilds
pub type BucketProgress = BTreeMap<String, PeriodProgress>;

/// The complete persisted progress store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressTree {
    buckets: BTreeMap<Bucket, BucketProgress>,
}

impl ProgressTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a user's record without creating it.
    pub fn user(
        &self,
        bucket: Bucket,
        period_key: &str,
        guild_id: u64,
        user_id: u64,
    ) -> Option<&UserProgress> {
        self.buckets
            .get(&bucket)?
            .get(period_key)?
            .get(&guild_id)?
            .get(&user_id)
    }

    /// Fetches or creates a user's record.
    pub fn user_mut(
        &mut self,
        bucket: Bucket,
        period_key: &str,
        guild_id: u64,
        user_id: u64,
    ) -> &mut UserProgress {
        self.buckets
            .entry(bucket)
            .or_default()
            .entry(period_key.to_string())
            .or_default()
            .entry(guild_id)
            .or_default()
            .entry(user_id)
            .or_default()
    }

    /// Reads one progress entry; missing entries read as zero.
    pub fn entry(
        &self,
        bucket: Bucket,
        period_key: &str,
        guild_id: u64,
        user_id: u64,
        quest_key: &str,
    ) -> ProgressEntry {
        self.user(bucket, period_key, guild_id, user_id)
            .map(|user| user.entry(quest_key))
            .unwrap_or_default()
    }

    /// Reads a user's assignment set for a period, if one was drawn.
    pub fn assigned(
        &self,
        bucket: Bucket,
        period_key: &str,
        guild_id: u64,
        user_id: u64,
    ) -> Option<&[String]> {
        self.user(bucket, period_key, guild_id, user_id)?
            .assigned
            .as_deref()
    }

    /// Every period key ever recorded for a bucket, in lexical order.
    pub fn period_keys(&self, bucket: Bucket) -> Vec<String> {
        self.buckets
            .get(&bucket)
            .map(|periods| periods.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Removes a user's record (entries and assignment) for one period.
    ///
    /// Empty guild, period and bucket maps left behind are pruned so the document does
    /// not accumulate empty shells.
    ///
    /// # Returns
    /// - `true` - A record existed and was removed
    /// - `false` - Nothing was recorded for that user in that period
    pub fn remove_user(
        &mut self,
        bucket: Bucket,
        period_key: &str,
        guild_id: u64,
        user_id: u64,
    ) -> bool {
        let Some(periods) = self.buckets.get_mut(&bucket) else {
            return false;
        };
        let Some(guilds) = periods.get_mut(period_key) else {
            return false;
        };
        let Some(users) = guilds.get_mut(&guild_id) else {
            return false;
        };

        let removed = users.remove(&user_id).is_some();

        if users.is_empty() {
            guilds.remove(&guild_id);
        }
        if guilds.is_empty() {
            periods.remove(period_key);
        }
        if periods.is_empty() {
            self.buckets.remove(&bucket);
        }

        removed
    }
}
