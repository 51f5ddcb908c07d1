use sea_orm::DatabaseConnection;

use crate::server::{
    data::tier::TierRepository,
    error::AppError,
    model::tier::{Tier, TierMultipliers},
};

/// Tier assignment and the point multiplier derived from it.
pub struct TierService<'a> {
    db: &'a DatabaseConnection,
    multipliers: &'a TierMultipliers,
}

impl<'a> TierService<'a> {
    pub fn new(db: &'a DatabaseConnection, multipliers: &'a TierMultipliers) -> Self {
        Self { db, multipliers }
    }

    /// Gets the reward multiplier of a member.
    ///
    /// # Returns
    /// - `Ok(f64)` - 1.0 without a tier, otherwise the tier's multiplier within
    ///   `[1.0, cap]`
    /// - `Err(AppError)` - Database error or an unreadable stored tier
    pub async fn multiplier(&self, user_id: u64) -> Result<f64, AppError> {
        let tier = TierRepository::new(self.db).get(user_id).await?;

        Ok(self.multipliers.for_tier(tier.map(|t| t.tier)))
    }

    pub async fn tier(&self, user_id: u64) -> Result<Option<Tier>, AppError> {
        let tier = TierRepository::new(self.db).get(user_id).await?;

        Ok(tier.map(|t| t.tier))
    }

    pub async fn set_tier(&self, user_id: u64, tier: Tier) -> Result<(), AppError> {
        TierRepository::new(self.db).set(user_id, tier).await?;

        tracing::info!("Set tier of user {} to {}", user_id, tier);

        Ok(())
    }

    /// Removes a member's tier, returning whether one was set
    pub async fn clear_tier(&self, user_id: u64) -> Result<bool, AppError> {
        Ok(TierRepository::new(self.db).clear(user_id).await?)
    }
}
