//! Persistence layer.
//!
//! This module contains the repositories behind the services. The quest ledger keeps its
//! progress tree and catalog as JSON documents (`progress_store`, `quest_catalog`); the
//! collaborator stores (points, daily streaks, invites, tiers, shop) are SeaORM
//! repositories that convert entity models into domain models at the boundary.

pub mod daily;
pub mod invite;
pub mod points;
pub mod progress_store;
pub mod quest_catalog;
pub mod shop;
pub mod tier;

#[cfg(test)]
mod test;
