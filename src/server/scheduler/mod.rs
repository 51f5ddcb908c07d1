//! Cron jobs run alongside the bot.

pub mod quest_rollover;
