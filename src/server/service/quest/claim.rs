//! Settlement of completed quests into points.

use chrono::{DateTime, Utc};

use crate::server::{
    data::{points::PointsRepository, tier::TierRepository},
    error::AppError,
    model::{
        claim::{ClaimOutcome, ClaimedQuest},
        progress::ProgressTree,
        quest::{Bucket, QuestCatalog, QuestSettings, RotatingBucket},
    },
    service::quest::{assignment::ensure_assignment, period::period_key},
};

use super::QuestService;

/// Marks every complete, unclaimed quest of a user as claimed.
///
/// Scans the daily and weekly assignments already drawn for the current periods and the
/// whole lifetime catalog. Once the scan is done, meta-quests in the weekly assignment
/// and the lifetime catalog advance by the number of ordinary quests claimed in this
/// scan; the weekly assignment is drawn first if the user has none yet this week. A
/// meta-quest completed that way is claimable on the next call, not this one.
///
/// # Arguments
/// - `tree` - Progress tree to settle
/// - `catalog` - Current quest catalog; assigned keys missing from it are ignored
/// - `guild_id` - Discord guild ID
/// - `user_id` - Discord user ID
/// - `now` - Instant selecting the current periods
/// - `settings` - Assignment size and seed salt for a weekly draw
///
/// # Returns
/// - `Vec<ClaimedQuest>` - Quests claimed, in bucket then key order
pub fn settle(
    tree: &mut ProgressTree,
    catalog: &QuestCatalog,
    guild_id: u64,
    user_id: u64,
    now: DateTime<Utc>,
    settings: &QuestSettings,
) -> Vec<ClaimedQuest> {
    let mut claimed = Vec::new();

    for bucket in Bucket::ALL {
        let period = period_key(bucket, now);

        for key in eligible_keys(tree, catalog, bucket, &period, guild_id, user_id) {
            let Some(quest) = catalog.get(bucket, &key) else {
                continue;
            };
            if !tree
                .entry(bucket, &period, guild_id, user_id, &key)
                .can_claim(quest)
            {
                continue;
            }

            tree.user_mut(bucket, &period, guild_id, user_id)
                .entry_mut(&key)
                .claimed += 1;

            claimed.push(ClaimedQuest {
                bucket,
                quest_key: quest.key.clone(),
                quest_name: quest.name.clone(),
                base_reward: quest.reward,
                meta: quest.is_meta(),
            });
        }
    }

    let completions = claimed.iter().filter(|quest| !quest.meta).count();
    let completions = u32::try_from(completions).unwrap_or(u32::MAX);
    if completions == 0 {
        return claimed;
    }

    let week = period_key(Bucket::Weekly, now);
    ensure_assignment(
        tree,
        catalog,
        RotatingBucket::Weekly,
        &week,
        guild_id,
        user_id,
        settings,
    );

    for bucket in [Bucket::Weekly, Bucket::Lifetime] {
        let period = period_key(bucket, now);

        for key in eligible_keys(tree, catalog, bucket, &period, guild_id, user_id) {
            let Some(quest) = catalog.get(bucket, &key) else {
                continue;
            };
            if !quest.is_meta() {
                continue;
            }

            tree.user_mut(bucket, &period, guild_id, user_id)
                .entry_mut(&key)
                .advance(completions, quest.target);
        }
    }

    claimed
}

/// Quest keys a user can settle in one bucket's current period.
fn eligible_keys(
    tree: &ProgressTree,
    catalog: &QuestCatalog,
    bucket: Bucket,
    period_key: &str,
    guild_id: u64,
    user_id: u64,
) -> Vec<String> {
    match bucket.rotating() {
        Some(_) => tree
            .assigned(bucket, period_key, guild_id, user_id)
            .map(<[String]>::to_vec)
            .unwrap_or_default(),
        None => catalog
            .keys(bucket)
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}

impl<'a> QuestService<'a> {
    /// Claims every complete quest of a user and credits the reward.
    ///
    /// The summed base reward is scaled by the user's tier multiplier and rounded to the
    /// nearest point. Settlement is one critical section over the progress store, so a
    /// second claim right after the first finds nothing left to claim.
    ///
    /// # Arguments
    /// - `guild_id` - Discord guild ID
    /// - `user_id` - Discord user ID
    /// - `now` - Instant selecting the current periods
    ///
    /// # Returns
    /// - `Ok(ClaimOutcome)` - What was claimed; empty when nothing was eligible
    /// - `Err(AppError)` - Catalog, progress store or database failure. When crediting
    ///   fails after settlement was persisted, the quests stay claimed
    pub async fn claim(
        &self,
        guild_id: u64,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<ClaimOutcome, AppError> {
        let catalog = self.ledger.catalog.load().await?;
        let tier = TierRepository::new(self.db).get(user_id).await?;
        let multiplier = self.tiers.for_tier(tier.map(|t| t.tier));

        let settings = self.ledger.settings;
        let claimed = self
            .ledger
            .store
            .mutate(|tree| settle(tree, &catalog, guild_id, user_id, now, &settings))
            .await?;

        let base_reward: u64 = claimed.iter().map(|q| u64::from(q.base_reward)).sum();
        let points_gained = (base_reward as f64 * multiplier).round() as i64;

        let new_total = if claimed.is_empty() {
            None
        } else {
            let points = PointsRepository::new(self.db);
            let total = if points_gained > 0 {
                points.add(user_id, points_gained).await
            } else {
                points.balance(user_id).await
            };

            match total {
                Ok(total) => Some(total),
                Err(e) => {
                    tracing::error!(
                        "Failed to credit {} points to user {} for {} claimed quests: {}",
                        points_gained,
                        user_id,
                        claimed.len(),
                        e
                    );
                    return Err(e.into());
                }
            }
        };

        if !claimed.is_empty() {
            tracing::info!(
                "User {} in guild {} claimed {} quests for {} points (x{})",
                user_id,
                guild_id,
                claimed.len(),
                points_gained,
                multiplier
            );
        }

        Ok(ClaimOutcome {
            guild_id,
            user_id,
            claimed,
            base_reward,
            multiplier,
            points_gained,
            new_total,
        })
    }
}
