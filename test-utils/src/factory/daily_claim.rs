//! Daily claim factory for creating streak rows.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Factory for creating daily claim rows with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::daily_claim::DailyClaimFactory;
///
/// let row = DailyClaimFactory::new(&db)
///     .user_id(42)
///     .last_claimed_at(Utc::now() - Duration::hours(30))
///     .streak(4)
///     .build()
///     .await?;
/// ```
pub struct DailyClaimFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: u64,
    last_claimed_at: DateTime<Utc>,
    streak: i32,
    best_streak: i32,
}

impl<'a> DailyClaimFactory<'a> {
    /// Creates a new DailyClaimFactory with default values.
    ///
    /// Defaults:
    /// - user_id: auto-incremented
    /// - last_claimed_at: now
    /// - streak: `1`
    /// - best_streak: `1`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            user_id: next_id(),
            last_claimed_at: Utc::now(),
            streak: 1,
            best_streak: 1,
        }
    }

    pub fn user_id(mut self, user_id: u64) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn last_claimed_at(mut self, last_claimed_at: DateTime<Utc>) -> Self {
        self.last_claimed_at = last_claimed_at;
        self
    }

    /// Sets the streak; raises the best streak to match when it would be lower.
    pub fn streak(mut self, streak: i32) -> Self {
        self.streak = streak;
        self.best_streak = self.best_streak.max(streak);
        self
    }

    pub fn best_streak(mut self, best_streak: i32) -> Self {
        self.best_streak = best_streak;
        self
    }

    /// Builds and inserts the row into the database.
    ///
    /// # Returns
    /// - `Ok(entity::daily_claim::Model)` - Created row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::daily_claim::Model, DbErr> {
        entity::daily_claim::ActiveModel {
            user_id: ActiveValue::Set(self.user_id.to_string()),
            last_claimed_at: ActiveValue::Set(self.last_claimed_at),
            streak: ActiveValue::Set(self.streak),
            best_streak: ActiveValue::Set(self.best_streak),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a daily claim row for `user_id` last claimed at `last_claimed_at`.
///
/// Shorthand for `DailyClaimFactory::new(db).user_id(..).last_claimed_at(..).build()`.
pub async fn create_daily_claim(
    db: &DatabaseConnection,
    user_id: u64,
    last_claimed_at: DateTime<Utc>,
) -> Result<entity::daily_claim::Model, DbErr> {
    DailyClaimFactory::new(db)
        .user_id(user_id)
        .last_claimed_at(last_claimed_at)
        .build()
        .await
}
