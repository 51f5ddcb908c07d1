//! Quest ledger service.
//!
//! This module provides the quest ledger: multi-period progress counters keyed by
//! (bucket, period, guild, user, quest), per-user random quest assignment for the
//! rotating buckets, idempotent claiming and the midnight rollover of open voice
//! sessions.
//!
//! `QuestLedger` owns the progress store and the catalog repository and is shared by
//! every gateway handler. All of its writes go through `ProgressStore::mutate`, so each
//! operation is one critical section over the whole tree. `QuestService` adds the claim
//! operation, which also needs the database for tiers and points.
//!
//! The ledger is organized into separate modules by concern:
//! - `period` - Period key resolution
//! - `assignment` - Deterministic per-user quest draws
//! - `ingestion` - Matching events against quests and advancing progress
//! - `claim` - Settlement of completed quests into points
//! - `rollover` - Splitting open voice sessions at UTC midnight
//! - `reset` - Admin reset and manual validation, plus the per-user quest view

pub mod assignment;
pub mod claim;
pub mod ingestion;
pub mod period;
pub mod reset;
pub mod rollover;

#[cfg(test)]
mod test;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{progress_store::ProgressStore, quest_catalog::QuestCatalogRepository},
    model::{quest::QuestSettings, tier::TierMultipliers},
};

/// Shared handle to the quest ledger.
///
/// Cheap to clone; clones share the same progress store lock and cache.
#[derive(Clone)]
pub struct QuestLedger {
    store: ProgressStore,
    catalog: QuestCatalogRepository,
    settings: QuestSettings,
}

impl QuestLedger {
    /// Creates a new QuestLedger.
    ///
    /// # Arguments
    /// - `store` - Progress store holding every period's counters and assignments
    /// - `catalog` - Repository for the quest catalog document, read on every operation
    /// - `settings` - Assignment size and seed salt
    ///
    /// # Returns
    /// - `QuestLedger` - New ledger handle
    pub fn new(
        store: ProgressStore,
        catalog: QuestCatalogRepository,
        settings: QuestSettings,
    ) -> Self {
        Self {
            store,
            catalog,
            settings,
        }
    }

    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    pub fn catalog(&self) -> &QuestCatalogRepository {
        &self.catalog
    }

    pub fn settings(&self) -> &QuestSettings {
        &self.settings
    }
}

/// Service settling completed quests into points.
pub struct QuestService<'a> {
    /// Database connection for tier lookups and point credits
    db: &'a DatabaseConnection,
    /// Quest ledger holding progress and catalog
    ledger: &'a QuestLedger,
    /// Configured tier multipliers applied to claimed rewards
    tiers: &'a TierMultipliers,
}

impl<'a> QuestService<'a> {
    /// Creates a new QuestService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `ledger` - Quest ledger to settle against
    /// - `tiers` - Tier multipliers for reward scaling
    ///
    /// # Returns
    /// - `QuestService` - New service instance
    pub fn new(
        db: &'a DatabaseConnection,
        ledger: &'a QuestLedger,
        tiers: &'a TierMultipliers,
    ) -> Self {
        Self { db, ledger, tiers }
    }
}
