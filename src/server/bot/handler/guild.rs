//! Guild event handlers.
//!
//! `guild_create` fires on startup for every guild the bot is in, when it joins a new
//! guild, and when a guild comes back after an outage. Each time, the guild's invite
//! listing replaces whatever the invite cache held for it, so joins that happened while
//! the bot was offline do not get attributed to the next member.

use serenity::all::{Context, Guild};

use crate::server::{bot::handler::invite::fetch_invites, state::AppState};

/// Handles the guild_create event by priming the invite cache.
///
/// # Arguments
/// - `state` - Shared application state
/// - `ctx` - Discord context for API access
/// - `guild` - Guild that became available
/// - `_is_new` - Whether the bot just joined the guild
pub async fn handle_guild_create(state: &AppState, ctx: Context, guild: Guild, _is_new: Option<bool>) {
    tracing::debug!(
        "Guild create event: {} ({}) - member_count: {}",
        guild.name,
        guild.id,
        guild.member_count
    );

    match fetch_invites(&ctx, guild.id).await {
        Ok(invites) => {
            tracing::debug!("Cached {} invites for guild {}", invites.len(), guild.id);
            state.invites.replace(guild.id.get(), invites).await;
        }
        Err(e) => {
            tracing::error!("Failed to fetch invites for guild {}: {}", guild.id, e);
        }
    }
}
