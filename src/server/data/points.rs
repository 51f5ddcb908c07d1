//! Points ledger data repository.
//!
//! This module provides the `PointsRepository` for the per-member point balance. Every
//! balance change is a read-modify-write inside one transaction, so concurrent credits
//! to the same member cannot lose an update. Balances never go below zero.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{
    ActiveValue, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect,
    TransactionTrait,
};

use crate::server::model::points::{Debit, PointBalance};

/// Repository providing database operations for point balances.
pub struct PointsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PointsRepository<'a> {
    /// Creates a new PointsRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `PointsRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets a member's balance record.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID
    ///
    /// # Returns
    /// - `Ok(Some(PointBalance))` - Member has a balance record
    /// - `Ok(None)` - Member never had points
    /// - `Err(DbErr)` - Database error during query
    pub async fn get(&self, user_id: u64) -> Result<Option<PointBalance>, DbErr> {
        let entity = entity::prelude::PointBalance::find_by_id(user_id.to_string())
            .one(self.db)
            .await?;

        entity.map(PointBalance::from_entity).transpose()
    }

    /// Gets a member's current balance, zero when they have no record.
    pub async fn balance(&self, user_id: u64) -> Result<i64, DbErr> {
        Ok(self.get(user_id).await?.map(|b| b.points).unwrap_or(0))
    }

    /// Adds (or with a negative amount, removes) points.
    ///
    /// The result is clamped at zero.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID
    /// - `amount` - Signed change to apply
    ///
    /// # Returns
    /// - `Ok(i64)` - New balance
    /// - `Err(DbErr)` - Database error; the balance is unchanged
    pub async fn add(&self, user_id: u64, amount: i64) -> Result<i64, DbErr> {
        let txn = self.db.begin().await?;

        let current = current_points(&txn, user_id).await?;
        let total = current.saturating_add(amount).max(0);
        write_points(&txn, user_id, total).await?;

        txn.commit().await?;

        Ok(total)
    }

    /// Overwrites a member's balance, clamped at zero.
    ///
    /// # Returns
    /// - `Ok(i64)` - The balance now stored
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn set(&self, user_id: u64, points: i64) -> Result<i64, DbErr> {
        let points = points.max(0);
        write_points(self.db, user_id, points).await?;

        Ok(points)
    }

    /// Debits `amount` only if the balance covers it.
    ///
    /// # Arguments
    /// - `user_id` - Discord user ID
    /// - `amount` - Points to remove, non-negative
    ///
    /// # Returns
    /// - `Ok(Debit::Applied)` - Debited; holds the new balance
    /// - `Ok(Debit::Insufficient)` - Balance too low; nothing changed
    /// - `Err(DbErr)` - Database error; the balance is unchanged
    pub async fn try_debit(&self, user_id: u64, amount: i64) -> Result<Debit, DbErr> {
        let txn = self.db.begin().await?;

        let current = current_points(&txn, user_id).await?;
        if current < amount {
            txn.rollback().await?;
            return Ok(Debit::Insufficient {
                missing: amount - current,
            });
        }

        let total = current - amount;
        write_points(&txn, user_id, total).await?;
        txn.commit().await?;

        Ok(Debit::Applied(total))
    }

    /// Gets the members with the most points.
    ///
    /// # Arguments
    /// - `limit` - Maximum number of entries
    ///
    /// # Returns
    /// - `Ok(Vec<PointBalance>)` - Balances by descending points, ties by user ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn leaderboard(&self, limit: u64) -> Result<Vec<PointBalance>, DbErr> {
        let entities = entity::prelude::PointBalance::find()
            .order_by_desc(entity::point_balance::Column::Points)
            .order_by_asc(entity::point_balance::Column::UserId)
            .limit(limit)
            .all(self.db)
            .await?;

        entities.into_iter().map(PointBalance::from_entity).collect()
    }
}

/// Reads the stored balance on any connection, including an open transaction.
pub(crate) async fn current_points<C: ConnectionTrait>(
    conn: &C,
    user_id: u64,
) -> Result<i64, DbErr> {
    Ok(entity::prelude::PointBalance::find_by_id(user_id.to_string())
        .one(conn)
        .await?
        .map(|m| m.points)
        .unwrap_or(0))
}

/// Inserts or replaces the stored balance on any connection.
pub(crate) async fn write_points<C: ConnectionTrait>(
    conn: &C,
    user_id: u64,
    points: i64,
) -> Result<(), DbErr> {
    entity::prelude::PointBalance::insert(entity::point_balance::ActiveModel {
        user_id: ActiveValue::Set(user_id.to_string()),
        points: ActiveValue::Set(points),
        updated_at: ActiveValue::Set(Utc::now()),
    })
    .on_conflict(
        OnConflict::column(entity::point_balance::Column::UserId)
            .update_columns([
                entity::point_balance::Column::Points,
                entity::point_balance::Column::UpdatedAt,
            ])
            .to_owned(),
    )
    .exec(conn)
    .await?;

    Ok(())
}
