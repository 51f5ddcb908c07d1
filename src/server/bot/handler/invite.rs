//! Invite cache maintenance.
//!
//! Discord reports invite use counts only when asked, so the cache is primed on
//! `guild_create` and kept current from invite create/delete events. Member joins diff
//! it against a fresh listing in `member.rs`.

use serenity::all::{Context, GuildId, InviteCreateEvent, InviteDeleteEvent};

use crate::server::{error::AppError, service::invite::CachedInvite, state::AppState};

/// Lists a guild's invites with their current use counts.
///
/// Requires the `MANAGE_GUILD` permission.
///
/// # Arguments
/// - `ctx` - Discord context for API access
/// - `guild_id` - Guild to list
///
/// # Returns
/// - `Ok(Vec<CachedInvite>)` - Every active invite of the guild
/// - `Err(AppError)` - Discord API error
pub async fn fetch_invites(ctx: &Context, guild_id: GuildId) -> Result<Vec<CachedInvite>, AppError> {
    let invites = guild_id.invites(&ctx.http).await?;

    Ok(invites
        .into_iter()
        .map(|invite| CachedInvite {
            code: invite.code,
            uses: invite.uses,
            inviter_id: invite.inviter.map(|user| user.id.get()),
        })
        .collect())
}

/// Handles the invite_create event by caching the new invite
pub async fn handle_invite_create(state: &AppState, _ctx: Context, data: InviteCreateEvent) {
    let Some(guild_id) = data.guild_id else {
        return;
    };

    state
        .invites
        .insert(
            guild_id.get(),
            CachedInvite {
                code: data.code.clone(),
                uses: data.uses,
                inviter_id: data.inviter.map(|user| user.id.get()),
            },
        )
        .await;

    tracing::debug!("Cached invite {} for guild {}", data.code, guild_id);
}

/// Handles the invite_delete event by dropping the invite from the cache
pub async fn handle_invite_delete(state: &AppState, _ctx: Context, data: InviteDeleteEvent) {
    let Some(guild_id) = data.guild_id else {
        return;
    };

    state.invites.remove(guild_id.get(), &data.code).await;

    tracing::debug!("Dropped invite {} for guild {}", data.code, guild_id);
}
