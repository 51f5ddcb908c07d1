//! Domain models for the points ledger.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

/// A member's point balance.
#[derive(Debug, Clone, PartialEq)]
pub struct PointBalance {
    /// Discord user ID.
    pub user_id: u64,
    /// Current balance, never negative.
    pub points: i64,
    /// Timestamp of the last change to the balance.
    pub updated_at: DateTime<Utc>,
}

impl PointBalance {
    /// Converts an entity model to a point balance at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The database entity model to convert
    ///
    /// # Returns
    /// - `Ok(PointBalance)` - Successfully converted model
    /// - `Err(DbErr::Custom)` - Stored user_id is not a valid u64
    pub fn from_entity(entity: entity::point_balance::Model) -> Result<Self, DbErr> {
        let user_id = entity
            .user_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse user_id: {}", e)))?;

        Ok(Self {
            user_id,
            points: entity.points,
            updated_at: entity.updated_at,
        })
    }
}

/// Result of a conditional debit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Debit {
    /// Points were removed; holds the new balance.
    Applied(i64),
    /// Balance too low; nothing was removed.
    Insufficient { missing: i64 },
}
