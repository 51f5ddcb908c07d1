//! Domain models for the daily login reward.

use chrono::{DateTime, Duration, Utc};
use sea_orm::DbErr;

/// Minimum time between two daily claims.
pub const DAILY_COOLDOWN: Duration = Duration::hours(24);

/// A streak continues only if the previous claim is younger than this.
pub const STREAK_WINDOW: Duration = Duration::hours(48);

/// Stored streak state of a member.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyStreak {
    pub user_id: u64,
    pub last_claimed_at: DateTime<Utc>,
    /// Consecutive days claimed, including the last claim.
    pub streak: i32,
    pub best_streak: i32,
}

impl DailyStreak {
    /// Converts an entity model to a streak at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The database entity model to convert
    ///
    /// # Returns
    /// - `Ok(DailyStreak)` - Successfully converted model
    /// - `Err(DbErr::Custom)` - Stored user_id is not a valid u64
    pub fn from_entity(entity: entity::daily_claim::Model) -> Result<Self, DbErr> {
        let user_id = entity
            .user_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse user_id: {}", e)))?;

        Ok(Self {
            user_id,
            last_claimed_at: entity.last_claimed_at,
            streak: entity.streak,
            best_streak: entity.best_streak,
        })
    }

    /// Time left before the member may claim again, or `None` when a claim is allowed.
    pub fn cooldown_remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        let ready_at = self.last_claimed_at + DAILY_COOLDOWN;
        (now < ready_at).then(|| ready_at - now)
    }

    /// Streak value a claim at `now` would produce.
    pub fn next_streak(&self, now: DateTime<Utc>) -> i32 {
        if now - self.last_claimed_at < STREAK_WINDOW {
            self.streak.saturating_add(1)
        } else {
            1
        }
    }
}

/// Result of a daily claim attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum DailyClaimOutcome {
    Claimed {
        reward: i64,
        streak: i32,
        best_streak: i32,
        new_total: i64,
    },
    Cooldown {
        remaining: Duration,
    },
}
