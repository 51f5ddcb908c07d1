//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the bot, which sits between the gateway
//! event handlers and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Quest matching, settlement, streaks and purchase rules
//! - **Orchestration**: Feeding collaborator outcomes (daily claims, invites) into the
//!   quest ledger
//! - **Domain Models**: Working with domain models rather than entity models

pub mod daily;
pub mod invite;
pub mod notification;
pub mod points;
pub mod quest;
pub mod shop;
pub mod tier;
pub mod voice;
