//! Member tier factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a member tier row.
///
/// The tier is stored as given, so tests can also insert values that are not valid
/// tiers.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Discord user ID
/// - `tier` - Stored tier name
///
/// # Returns
/// - `Ok(entity::member_tier::Model)` - Created row
/// - `Err(DbErr)` - Database error during insert
pub async fn create_member_tier(
    db: &DatabaseConnection,
    user_id: u64,
    tier: &str,
) -> Result<entity::member_tier::Model, DbErr> {
    entity::member_tier::ActiveModel {
        user_id: ActiveValue::Set(user_id.to_string()),
        tier: ActiveValue::Set(tier.to_string()),
        updated_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
