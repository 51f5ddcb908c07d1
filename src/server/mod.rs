//! Discord community bot backend and quest ledger.
//!
//! This module contains the complete implementation of the bot: gateway event handling,
//! the quest progress ledger, and the collaborator services around it (points, daily
//! rewards, invites, tiers, shop). SeaORM over SQLite stores the collaborator tables;
//! quest progress and the quest catalog live in JSON documents owned by the ledger.
//!
//! # Architecture
//!
//! The code follows a layered architecture:
//!
//! - **Bot Layer** (`bot/`) - Serenity event handlers that turn gateway events into
//!   quest triggers and service calls
//! - **Service Layer** (`service/`) - Business logic: the quest ledger operations and the
//!   collaborator services
//! - **Data Layer** (`data/`) - Progress store, quest catalog document, and SeaORM
//!   repositories converting entities to domain models
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state handed to the event handler
//! - **Startup** (`startup`) - Database connection, migrations and quest ledger setup
//! - **Scheduler** (`scheduler/`) - Cron jobs (quest rollover sweep)
//! - **Util** (`util/`) - Atomic file writes and id parsing
//!
//! # Event Flow
//!
//! 1. **Bot** receives a gateway event and ignores bot authors
//! 2. **Service** maps it to a `QuestEvent` or collaborator operation
//! 3. **Quest ledger** applies it under the progress store's lock in one read-modify-write
//! 4. Failures are logged by the handler and the event is dropped

pub mod bot;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
