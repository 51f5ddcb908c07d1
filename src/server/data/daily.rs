//! Daily login reward data repository.
//!
//! Streak rows are written with optimistic concurrency: the first claim is an insert
//! that does nothing if a row appeared meanwhile, and every later claim only updates
//! the row if `last_claimed_at` still holds the value the caller read. Whoever loses
//! the race sees `false` and must not pay out.

use chrono::{DateTime, Utc};
use migration::OnConflict;
use sea_orm::{
    sea_query::Expr, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::server::model::daily::DailyStreak;

/// Repository providing database operations for daily claim streaks.
pub struct DailyClaimRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DailyClaimRepository<'a> {
    /// Creates a new DailyClaimRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `DailyClaimRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a member's streak state.
    ///
    /// # Returns
    /// - `Ok(Some(DailyStreak))` - Member claimed at least once
    /// - `Ok(None)` - Member never claimed
    /// - `Err(DbErr)` - Database error during query
    pub async fn get(&self, user_id: u64) -> Result<Option<DailyStreak>, DbErr> {
        let entity = entity::prelude::DailyClaim::find_by_id(user_id.to_string())
            .one(self.db)
            .await?;

        entity.map(DailyStreak::from_entity).transpose()
    }

    /// Records a member's very first claim.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID
    /// - `now` - Claim instant
    ///
    /// # Returns
    /// - `Ok(true)` - Row created; this claim won
    /// - `Ok(false)` - A concurrent claim created the row first
    /// - `Err(DbErr)` - Database error during insert
    pub async fn record_first_claim(
        &self,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let inserted = entity::prelude::DailyClaim::insert(entity::daily_claim::ActiveModel {
            user_id: ActiveValue::Set(user_id.to_string()),
            last_claimed_at: ActiveValue::Set(now),
            streak: ActiveValue::Set(1),
            best_streak: ActiveValue::Set(1),
        })
        .on_conflict(
            OnConflict::column(entity::daily_claim::Column::UserId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(self.db)
        .await?;

        Ok(inserted == 1)
    }

    /// Records a repeat claim if no other claim landed since `previous` was read.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID
    /// - `previous` - `last_claimed_at` as read before deciding to pay out
    /// - `now` - Claim instant
    /// - `streak` - New streak value
    /// - `best_streak` - New best streak value
    ///
    /// # Returns
    /// - `Ok(true)` - Row updated; this claim won
    /// - `Ok(false)` - The row changed since it was read
    /// - `Err(DbErr)` - Database error during update
    pub async fn record_claim(
        &self,
        user_id: u64,
        previous: DateTime<Utc>,
        now: DateTime<Utc>,
        streak: i32,
        best_streak: i32,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::DailyClaim::update_many()
            .col_expr(entity::daily_claim::Column::LastClaimedAt, Expr::value(now))
            .col_expr(entity::daily_claim::Column::Streak, Expr::value(streak))
            .col_expr(entity::daily_claim::Column::BestStreak, Expr::value(best_streak))
            .filter(entity::daily_claim::Column::UserId.eq(user_id.to_string()))
            .filter(entity::daily_claim::Column::LastClaimedAt.eq(previous))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
