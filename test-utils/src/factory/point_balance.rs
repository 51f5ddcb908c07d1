//! Point balance factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a point balance row for a member.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Discord user ID
/// - `points` - Stored balance
///
/// # Returns
/// - `Ok(entity::point_balance::Model)` - Created row
/// - `Err(DbErr)` - Database error during insert
pub async fn create_balance(
    db: &DatabaseConnection,
    user_id: u64,
    points: i64,
) -> Result<entity::point_balance::Model, DbErr> {
    entity::point_balance::ActiveModel {
        user_id: ActiveValue::Set(user_id.to_string()),
        points: ActiveValue::Set(points),
        updated_at: ActiveValue::Set(Utc::now()),
    }
    .insert(db)
    .await
}
