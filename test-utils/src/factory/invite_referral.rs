//! Invite referral factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a referral of `member_id` by `inviter_id` in `guild_id`.
///
/// # Returns
/// - `Ok(entity::invite_referral::Model)` - Created row
/// - `Err(DbErr)` - Database error during insert
pub async fn create_referral(
    db: &DatabaseConnection,
    guild_id: u64,
    member_id: u64,
    inviter_id: u64,
) -> Result<entity::invite_referral::Model, DbErr> {
    entity::invite_referral::ActiveModel {
        id: ActiveValue::NotSet,
        guild_id: ActiveValue::Set(guild_id.to_string()),
        member_id: ActiveValue::Set(member_id.to_string()),
        inviter_id: ActiveValue::Set(inviter_id.to_string()),
        created_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
