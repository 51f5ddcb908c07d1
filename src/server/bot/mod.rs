//! Discord bot integration feeding the quest ledger.
//!
//! The bot listens to gateway events and turns each one into a quest trigger: messages,
//! voice sessions, reactions, command interactions, invite joins and server boosts. It
//! never renders UI or registers commands; claim, shop and admin flows are library
//! operations on the services for whatever front end sits on top.
//!
//! The bot is initialized during startup and runs in a separate tokio task. Its HTTP
//! client is returned to the caller so other services (such as the quest notification
//! sink) can send messages without a second connection.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild availability, used to prime the invite cache
//! - `GUILD_MESSAGES` / `MESSAGE_CONTENT` - Message quests, including exact-text matches
//! - `GUILD_MEMBERS` - Joins, leaves and boosts (privileged intent)
//! - `GUILD_VOICE_STATES` - Voice session tracking
//! - `GUILD_MESSAGE_REACTIONS` - Reaction quests
//! - `GUILD_INVITES` - Invite create/delete for the invite cache
//!
//! `GUILD_MEMBERS` and `MESSAGE_CONTENT` are privileged intents and must be enabled in
//! the Discord Developer Portal for the bot application.

pub mod handler;
pub mod start;
