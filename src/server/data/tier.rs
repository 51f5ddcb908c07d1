//! Member tier data repository.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, DbErr, EntityTrait};

use crate::server::{
    error::AppError,
    model::tier::{MemberTier, Tier},
};

/// Repository providing database operations for member tiers.
pub struct TierRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TierRepository<'a> {
    /// Creates a new TierRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `TierRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a member's tier.
    ///
    /// # Returns
    /// - `Ok(Some(MemberTier))` - Member has a tier
    /// - `Ok(None)` - Member has no tier
    /// - `Err(AppError::DbErr)` - Database error during query
    /// - `Err(AppError::InternalErr)` - Stored row could not be converted
    pub async fn get(&self, user_id: u64) -> Result<Option<MemberTier>, AppError> {
        let entity = entity::prelude::MemberTier::find_by_id(user_id.to_string())
            .one(self.db)
            .await?;

        entity.map(MemberTier::from_entity).transpose()
    }

    /// Assigns or replaces a member's tier.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID
    /// - `tier` - Tier to assign
    ///
    /// # Returns
    /// - `Ok(())` - Tier stored
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn set(&self, user_id: u64, tier: Tier) -> Result<(), DbErr> {
        entity::prelude::MemberTier::insert(entity::member_tier::ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            tier: ActiveValue::Set(tier.as_str().to_string()),
            updated_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::member_tier::Column::UserId)
                .update_columns([
                    entity::member_tier::Column::Tier,
                    entity::member_tier::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(self.db)
        .await?;

        Ok(())
    }

    /// Removes a member's tier.
    ///
    /// # Returns
    /// - `Ok(true)` - A tier was removed
    /// - `Ok(false)` - Member had no tier
    /// - `Err(DbErr)` - Database error during delete
    pub async fn clear(&self, user_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::MemberTier::delete_by_id(user_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
