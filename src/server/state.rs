//! Application state shared by the bot's event handlers and the scheduler.
//!
//! `AppState` is built once during startup and cloned into the Serenity event handler.
//! Every field is cheap to clone: the database connection is a pool, and the quest
//! ledger, voice tracker and invite cache share their inner state behind `Arc`s, so
//! every clone sees the same progress store and the same open sessions.

use sea_orm::DatabaseConnection;

use crate::server::{
    config::{Config, DailyRewardConfig},
    model::tier::TierMultipliers,
    service::{invite::InviteCache, quest::QuestLedger, voice::VoiceTracker},
};

#[derive(Clone)]
pub struct AppState {
    /// Connection pool for the points, daily, invite, tier and shop tables.
    pub db: DatabaseConnection,

    /// Quest ledger owning the progress store and its lock.
    pub ledger: QuestLedger,

    /// Open voice sessions; also read by the rollover scheduler.
    pub voice: VoiceTracker,

    /// Last known invite use counts per guild.
    pub invites: InviteCache,

    pub tier_multipliers: TierMultipliers,
    pub daily: DailyRewardConfig,
    pub invite_reward_points: i64,

    /// Members holding any of these roles make `reaction_mod` quests progress.
    pub moderator_role_ids: Vec<u64>,

    /// Channel quest completions are announced in; DMs when unset.
    pub quest_log_channel_id: Option<u64>,

    /// Channel invite joins are announced in; not announced when unset.
    pub invite_log_channel_id: Option<u64>,

    /// Channel shop purchases are announced in; not announced when unset.
    pub shop_log_channel_id: Option<u64>,
}

impl AppState {
    /// Creates the application state from configuration and the started resources.
    ///
    /// # Arguments
    /// - `config` - Application configuration
    /// - `db` - Migrated database connection
    /// - `ledger` - Quest ledger over the configured catalog and progress store
    /// - `voice` - Voice tracker shared with the rollover scheduler
    ///
    /// # Returns
    /// - `AppState` - State ready to hand to the bot
    pub fn new(
        config: &Config,
        db: DatabaseConnection,
        ledger: QuestLedger,
        voice: VoiceTracker,
    ) -> Self {
        Self {
            db,
            ledger,
            voice,
            invites: InviteCache::new(),
            tier_multipliers: config.tier_multipliers,
            daily: config.daily,
            invite_reward_points: config.invite_reward_points,
            moderator_role_ids: config.moderator_role_ids.clone(),
            quest_log_channel_id: config.quest_log_channel_id,
            invite_log_channel_id: config.invite_log_channel_id,
            shop_log_channel_id: config.shop_log_channel_id,
        }
    }
}
