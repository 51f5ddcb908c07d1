//! Domain models shared by the data, service and bot layers.
//!
//! Repository-backed models convert from SeaORM entities at the repository boundary via
//! `from_entity`, parsing Discord IDs stored as strings into `u64`. Quest models are plain
//! serde types persisted in JSON documents.

pub mod claim;
pub mod daily;
pub mod invite;
pub mod points;
pub mod progress;
pub mod quest;
pub mod quest_event;
pub mod shop;
pub mod tier;
