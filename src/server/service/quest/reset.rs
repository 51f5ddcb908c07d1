//! Admin operations on a user's quests, plus the per-user quest view.

use chrono::{DateTime, Utc};

use crate::server::{
    error::AppError,
    model::{
        claim::{QuestStatus, ResetScope},
        quest::{Bucket, QuestKind},
        quest_event::{QuestEvent, QuestTrigger},
    },
    service::quest::{assignment::ensure_assignment, ingestion::apply_event, period::period_key},
};

use super::QuestLedger;

impl QuestLedger {
    /// Deletes a user's progress and assignments.
    ///
    /// This is destructive and has no undo.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `user_id` - Discord user ID
    /// - `scope` - Buckets to clear; lifetime progress is never reset
    /// - `all_history` - Clear every recorded period instead of only the current one
    /// - `now` - Instant selecting the current periods
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of (bucket, period) records removed
    /// - `Err(AppError)` - The progress store could not be read or written
    pub async fn reset_user_quests(
        &self,
        guild_id: u64,
        user_id: u64,
        scope: ResetScope,
        all_history: bool,
        now: DateTime<Utc>,
    ) -> Result<usize, AppError> {
        let removed = self
            .store
            .mutate(|tree| {
                let mut removed = 0;
                for &bucket in scope.buckets() {
                    let periods = if all_history {
                        tree.period_keys(bucket)
                    } else {
                        vec![period_key(bucket, now)]
                    };

                    for period in periods {
                        if tree.remove_user(bucket, &period, guild_id, user_id) {
                            removed += 1;
                        }
                    }
                }
                removed
            })
            .await?;

        tracing::info!(
            "Reset {} quest periods of user {} in guild {} ({:?}, all history: {})",
            removed,
            user_id,
            guild_id,
            scope,
            all_history
        );

        Ok(removed)
    }

    /// Completes a `manual_actor` quest for a user.
    ///
    /// Daily and weekly manual quests only complete when they are in the user's
    /// assignment for the current period.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `user_id` - Discord user ID
    /// - `bucket` - Bucket the quest is listed under
    /// - `quest_key` - Key of the quest
    /// - `now` - Validation instant
    ///
    /// # Returns
    /// - `Ok(true)` - The quest was completed
    /// - `Ok(false)` - Already complete, or not assigned to the user
    /// - `Err(AppError::NotFound)` - No valid quest with that key in the bucket
    /// - `Err(AppError::BadRequest)` - The quest is not validated by hand
    /// - `Err(AppError)` - The catalog or progress store could not be read or written
    pub async fn validate_quest(
        &self,
        guild_id: u64,
        user_id: u64,
        bucket: Bucket,
        quest_key: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let catalog = self.catalog.load().await?;

        let quest = catalog.get(bucket, quest_key).ok_or_else(|| {
            AppError::NotFound(format!("Quest {}/{} not found", bucket, quest_key))
        })?;
        if quest.kind != QuestKind::ManualActor {
            return Err(AppError::BadRequest(format!(
                "Quest {}/{} is not validated manually",
                bucket, quest_key
            )));
        }

        let event = QuestEvent::new(
            guild_id,
            user_id,
            now,
            QuestTrigger::ManualValidation {
                bucket,
                quest_key: quest_key.to_string(),
            },
        );
        let settings = self.settings;
        let updates = self
            .store
            .mutate(|tree| apply_event(tree, &catalog, &settings, &event))
            .await?;

        Ok(!updates.is_empty())
    }

    /// Lists the quests a user currently sees, drawing assignments where needed.
    ///
    /// # Returns
    /// - `Ok(Vec<QuestStatus>)` - Assigned daily and weekly quests, then every lifetime
    ///   quest, each with its progress in the current period
    /// - `Err(AppError)` - The catalog or progress store could not be read or written
    pub async fn user_quests(
        &self,
        guild_id: u64,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Vec<QuestStatus>, AppError> {
        let catalog = self.catalog.load().await?;
        let settings = self.settings;

        self.store
            .mutate(|tree| {
                let mut statuses = Vec::new();

                for bucket in Bucket::ALL {
                    let period = period_key(bucket, now);
                    let keys = match bucket.rotating() {
                        Some(rotating) => ensure_assignment(
                            tree, &catalog, rotating, &period, guild_id, user_id, &settings,
                        ),
                        None => catalog
                            .keys(bucket)
                            .into_iter()
                            .map(str::to_string)
                            .collect(),
                    };

                    for key in keys {
                        let Some(quest) = catalog.get(bucket, &key) else {
                            continue;
                        };
                        statuses.push(QuestStatus {
                            period_key: period.clone(),
                            quest: quest.clone(),
                            entry: tree.entry(bucket, &period, guild_id, user_id, &key),
                        });
                    }
                }

                statuses
            })
            .await
    }
}
