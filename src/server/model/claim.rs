//! Claim, settlement and reset domain models.

use crate::server::model::{
    progress::ProgressEntry,
    quest::{Bucket, QuestDefinition},
};

/// One quest reward converted into points by a claim.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimedQuest {
    pub bucket: Bucket,
    pub quest_key: String,
    pub quest_name: String,
    /// Reward before the member's tier multiplier.
    pub base_reward: u32,
    /// Whether the quest was a meta-quest; meta claims do not feed other meta-quests.
    pub meta: bool,
}

/// Result of a claim call.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimOutcome {
    pub guild_id: u64,
    pub user_id: u64,
    /// Quests claimed by this call, in bucket then key order.
    pub claimed: Vec<ClaimedQuest>,
    /// Sum of base rewards.
    pub base_reward: u64,
    /// Tier multiplier applied to `base_reward`.
    pub multiplier: f64,
    /// Points actually credited.
    pub points_gained: i64,
    /// Balance after crediting; `None` when nothing was claimed.
    pub new_total: Option<i64>,
}

impl ClaimOutcome {
    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}

/// Payload handed to a notification sink for every claimed quest.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestNotification {
    pub guild_id: u64,
    pub user_id: u64,
    pub bucket: Bucket,
    pub quest_name: String,
    pub base_reward: u32,
    pub new_total: i64,
}

/// A quest as currently seen by one user.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestStatus {
    pub period_key: String,
    pub quest: QuestDefinition,
    pub entry: ProgressEntry,
}

impl QuestStatus {
    pub fn claimable(&self) -> bool {
        self.entry.can_claim(&self.quest)
    }
}

/// Which buckets an admin reset touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetScope {
    Daily,
    Weekly,
    Both,
}

impl ResetScope {
    pub fn buckets(&self) -> &'static [Bucket] {
        match self {
            ResetScope::Daily => &[Bucket::Daily],
            ResetScope::Weekly => &[Bucket::Weekly],
            ResetScope::Both => &[Bucket::Daily, Bucket::Weekly],
        }
    }
}
