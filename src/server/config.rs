use std::{path::PathBuf, str::FromStr};

use crate::server::{
    error::{config::ConfigError, AppError},
    model::{quest::QuestSettings, tier::TierMultipliers},
};

const DEFAULT_QUEST_CATALOG_PATH: &str = "data/quests.json";
const DEFAULT_QUEST_PROGRESS_PATH: &str = "data/quest_progress.json";
const DEFAULT_ASSIGNMENT_SIZE: usize = 3;
const DEFAULT_INVITE_REWARD_POINTS: i64 = 30;
const DEFAULT_DAILY_REWARD: i64 = 10;
const DEFAULT_DAILY_STREAK_BONUS: i64 = 2;
const DEFAULT_DAILY_STREAK_BONUS_CAP: i64 = 5;

/// Daily login reward parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyRewardConfig {
    /// Points credited for every daily claim.
    pub base_reward: i64,
    /// Extra points per consecutive day after the first.
    pub streak_bonus: i64,
    /// Maximum number of streak days that earn a bonus.
    pub streak_bonus_cap: i64,
}

impl Default for DailyRewardConfig {
    fn default() -> Self {
        Self {
            base_reward: DEFAULT_DAILY_REWARD,
            streak_bonus: DEFAULT_DAILY_STREAK_BONUS,
            streak_bonus_cap: DEFAULT_DAILY_STREAK_BONUS_CAP,
        }
    }
}

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    pub quest_catalog_path: PathBuf,
    pub quest_progress_path: PathBuf,
    pub quest_settings: QuestSettings,

    pub quest_log_channel_id: Option<u64>,
    pub invite_log_channel_id: Option<u64>,
    pub shop_log_channel_id: Option<u64>,
    pub moderator_role_ids: Vec<u64>,

    pub invite_reward_points: i64,
    pub daily: DailyRewardConfig,
    pub tier_multipliers: TierMultipliers,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let default_tiers = TierMultipliers::default();

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            quest_catalog_path: optional::<PathBuf>("QUEST_CATALOG_PATH")?
                .unwrap_or_else(|| PathBuf::from(DEFAULT_QUEST_CATALOG_PATH)),
            quest_progress_path: optional::<PathBuf>("QUEST_PROGRESS_PATH")?
                .unwrap_or_else(|| PathBuf::from(DEFAULT_QUEST_PROGRESS_PATH)),
            quest_settings: QuestSettings {
                assignment_size: optional("QUEST_ASSIGNMENT_SIZE")?
                    .unwrap_or(DEFAULT_ASSIGNMENT_SIZE),
                // A fresh salt per process only changes how *new* assignments are drawn;
                // existing assignments are persisted and stay stable.
                seed_salt: optional("QUEST_SEED_SALT")?.unwrap_or_else(rand::random),
            },
            quest_log_channel_id: optional("QUEST_LOG_CHANNEL_ID")?,
            invite_log_channel_id: optional("INVITE_LOG_CHANNEL_ID")?,
            shop_log_channel_id: optional("SHOP_LOG_CHANNEL_ID")?,
            moderator_role_ids: id_list("MODERATOR_ROLE_IDS")?,
            invite_reward_points: optional("INVITE_REWARD_POINTS")?
                .unwrap_or(DEFAULT_INVITE_REWARD_POINTS),
            daily: DailyRewardConfig {
                base_reward: optional("DAILY_REWARD")?.unwrap_or(DEFAULT_DAILY_REWARD),
                streak_bonus: optional("DAILY_STREAK_BONUS")?
                    .unwrap_or(DEFAULT_DAILY_STREAK_BONUS),
                streak_bonus_cap: optional("DAILY_STREAK_BONUS_CAP")?
                    .unwrap_or(DEFAULT_DAILY_STREAK_BONUS_CAP),
            },
            tier_multipliers: TierMultipliers {
                bronze: optional("TIER_MULTIPLIER_BRONZE")?.unwrap_or(default_tiers.bronze),
                silver: optional("TIER_MULTIPLIER_SILVER")?.unwrap_or(default_tiers.silver),
                gold: optional("TIER_MULTIPLIER_GOLD")?.unwrap_or(default_tiers.gold),
                cap: optional("TIER_MULTIPLIER_CAP")?.unwrap_or(default_tiers.cap),
            },
        })
    }
}

/// Reads a required environment variable.
fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Reads and parses an optional environment variable.
///
/// Unset or empty variables yield `Ok(None)`; a value that fails to parse is an error
/// rather than a silent fallback to the default.
fn optional<T: FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value,
            }),
        _ => Ok(None),
    }
}

/// Reads a comma-separated list of Discord IDs.
fn id_list(name: &str) -> Result<Vec<u64>, ConfigError> {
    let Ok(value) = std::env::var(name) else {
        return Ok(Vec::new());
    };

    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u64>().map_err(|_| ConfigError::InvalidEnvVar {
                name: name.to_string(),
                value: value.clone(),
            })
        })
        .collect()
}
