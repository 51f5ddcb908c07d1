//! Daily login reward with streaks.
//!
//! A member may claim once every 24 hours. Claims less than 48 hours apart extend the
//! streak, which adds a capped bonus to the reward. Every successful claim also counts
//! toward `daily_claims_week` quests.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    config::DailyRewardConfig,
    data::{daily::DailyClaimRepository, points::PointsRepository},
    error::AppError,
    model::{
        daily::{DailyClaimOutcome, DAILY_COOLDOWN},
        quest_event::{QuestEvent, QuestTrigger},
    },
    service::quest::QuestLedger,
};

pub struct DailyService<'a> {
    db: &'a DatabaseConnection,
    ledger: &'a QuestLedger,
    config: &'a DailyRewardConfig,
}

impl<'a> DailyService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        ledger: &'a QuestLedger,
        config: &'a DailyRewardConfig,
    ) -> Self {
        Self { db, ledger, config }
    }

    /// Claims the daily reward for a member.
    ///
    /// Concurrent claims race on a conditional write of the claim row; only the winner
    /// is paid and the others see the cooldown.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the claim was made in, for quest progress
    /// - `user_id` - Discord user ID
    /// - `now` - Claim instant
    ///
    /// # Returns
    /// - `Ok(DailyClaimOutcome::Claimed)` - Reward credited
    /// - `Ok(DailyClaimOutcome::Cooldown)` - Claimed less than 24 hours ago
    /// - `Err(AppError)` - Database error
    pub async fn claim_daily(
        &self,
        guild_id: u64,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<DailyClaimOutcome, AppError> {
        let repo = DailyClaimRepository::new(self.db);

        let (streak, best_streak) = match repo.get(user_id).await? {
            None => {
                if !repo.record_first_claim(user_id, now).await? {
                    return self.lost_race(&repo, user_id, now).await;
                }
                (1, 1)
            }
            Some(previous) => {
                if let Some(remaining) = previous.cooldown_remaining(now) {
                    return Ok(DailyClaimOutcome::Cooldown { remaining });
                }

                let streak = previous.next_streak(now);
                let best_streak = previous.best_streak.max(streak);
                let won = repo
                    .record_claim(
                        user_id,
                        previous.last_claimed_at,
                        now,
                        streak,
                        best_streak,
                    )
                    .await?;
                if !won {
                    return self.lost_race(&repo, user_id, now).await;
                }
                (streak, best_streak)
            }
        };

        let reward = daily_reward(self.config, streak);
        let new_total = PointsRepository::new(self.db).add(user_id, reward).await?;

        tracing::info!(
            "User {} claimed daily reward of {} points (streak {})",
            user_id,
            reward,
            streak
        );

        let event = QuestEvent::new(guild_id, user_id, now, QuestTrigger::DailyClaim);
        if let Err(e) = self.ledger.ingest(event).await {
            tracing::error!(
                "Failed to record daily claim quest progress for user {}: {}",
                user_id,
                e
            );
        }

        Ok(DailyClaimOutcome::Claimed {
            reward,
            streak,
            best_streak,
            new_total,
        })
    }

    async fn lost_race(
        &self,
        repo: &DailyClaimRepository<'_>,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<DailyClaimOutcome, AppError> {
        let remaining = repo
            .get(user_id)
            .await?
            .and_then(|streak| streak.cooldown_remaining(now))
            .unwrap_or(DAILY_COOLDOWN);

        Ok(DailyClaimOutcome::Cooldown { remaining })
    }
}

/// Reward for a claim that brings the streak to `streak`.
pub fn daily_reward(config: &DailyRewardConfig, streak: i32) -> i64 {
    let bonus_days = i64::from(streak.saturating_sub(1).max(0)).min(config.streak_bonus_cap);

    config.base_reward + bonus_days * config.streak_bonus
}
