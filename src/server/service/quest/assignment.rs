//! Deterministic per-user quest draws for the rotating buckets.
//!
//! A user's daily/weekly quest set is drawn once per period from a seed built out of
//! (salt, bucket, period, guild, user) and persisted next to their progress. Later
//! calls return the stored set, so catalog edits never reshuffle a running period.

use std::hash::{DefaultHasher, Hash, Hasher};

use rand::{rngs::StdRng, SeedableRng};

use crate::server::{
    error::AppError,
    model::{
        progress::ProgressTree,
        quest::{Bucket, QuestCatalog, QuestSettings, RotatingBucket},
    },
};

use super::QuestLedger;

/// Builds the draw seed for one user's period.
pub fn assignment_seed(
    salt: u64,
    bucket: RotatingBucket,
    period_key: &str,
    guild_id: u64,
    user_id: u64,
) -> u64 {
    let mut hasher = DefaultHasher::new();
    salt.hash(&mut hasher);
    Bucket::from(bucket).as_str().hash(&mut hasher);
    period_key.hash(&mut hasher);
    guild_id.hash(&mut hasher);
    user_id.hash(&mut hasher);
    hasher.finish()
}

/// Draws up to `size` distinct keys from `keys`.
///
/// When the catalog holds no more than `size` quests every key is returned. Drawn keys
/// keep the order they have in `keys`.
pub fn sample_assignment(keys: &[&str], seed: u64, size: usize) -> Vec<String> {
    if keys.len() <= size {
        return keys.iter().map(|key| key.to_string()).collect();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut picked = rand::seq::index::sample(&mut rng, keys.len(), size).into_vec();
    picked.sort_unstable();

    picked.into_iter().map(|i| keys[i].to_string()).collect()
}

/// Returns the user's assignment for a period, drawing and storing it on first use.
///
/// An empty bucket catalog yields an empty set that is not stored, so quests added later
/// in the same period can still be drawn.
///
/// # Arguments
/// - `tree` - Progress tree to read and record the assignment in
/// - `catalog` - Current quest catalog
/// - `bucket` - Rotating bucket to draw for
/// - `period_key` - Current period of `bucket`
/// - `guild_id` - Discord guild ID
/// - `user_id` - Discord user ID
/// - `settings` - Assignment size and seed salt
///
/// # Returns
/// - `Vec<String>` - Assigned quest keys
pub fn ensure_assignment(
    tree: &mut ProgressTree,
    catalog: &QuestCatalog,
    bucket: RotatingBucket,
    period_key: &str,
    guild_id: u64,
    user_id: u64,
    settings: &QuestSettings,
) -> Vec<String> {
    let bucket_all = Bucket::from(bucket);
    if let Some(assigned) = tree.assigned(bucket_all, period_key, guild_id, user_id) {
        return assigned.to_vec();
    }

    let keys = catalog.keys(bucket_all);
    if keys.is_empty() {
        return Vec::new();
    }

    let seed = assignment_seed(settings.seed_salt, bucket, period_key, guild_id, user_id);
    let drawn = sample_assignment(&keys, seed, settings.assignment_size);

    tree.user_mut(bucket_all, period_key, guild_id, user_id).assigned = Some(drawn.clone());

    drawn
}

impl QuestLedger {
    /// Returns the user's quest keys for a rotating bucket's current period.
    ///
    /// Concurrent first calls for the same user all see the same set: the draw happens
    /// inside the store's critical section.
    ///
    /// # Arguments
    /// - `bucket` - Daily or weekly
    /// - `period_key` - Period to draw for
    /// - `guild_id` - Discord guild ID
    /// - `user_id` - Discord user ID
    ///
    /// # Returns
    /// - `Ok(Vec<String>)` - Assigned quest keys, stable for the rest of the period
    /// - `Err(AppError)` - The catalog or progress store could not be read or written
    pub async fn ensure_assignment(
        &self,
        bucket: RotatingBucket,
        period_key: &str,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Vec<String>, AppError> {
        let catalog = self.catalog.load().await?;
        let settings = self.settings;

        self.store
            .mutate(|tree| {
                ensure_assignment(
                    tree, &catalog, bucket, period_key, guild_id, user_id, &settings,
                )
            })
            .await
    }
}
