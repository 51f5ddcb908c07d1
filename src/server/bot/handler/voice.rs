//! Voice session tracking.
//!
//! Serenity's cache may not hold the previous voice state, so the tracker itself is the
//! source of truth: any state with a channel starts a session (a move between channels
//! keeps the running one), a state without a channel ends it.

use chrono::Utc;
use serenity::all::{Context, VoiceState};

use crate::server::{
    model::quest_event::{QuestEvent, QuestTrigger},
    state::AppState,
};

/// Handles the voice_state_update event
///
/// # Arguments
/// - `state` - Shared application state
/// - `_ctx` - Discord context
/// - `_old` - Previous voice state if cached
/// - `new` - New voice state
pub async fn handle_voice_state_update(
    state: &AppState,
    _ctx: Context,
    _old: Option<VoiceState>,
    new: VoiceState,
) {
    let Some(guild_id) = new.guild_id else {
        return;
    };
    if new.member.as_ref().is_some_and(|member| member.user.bot) {
        return;
    }

    let guild_id = guild_id.get();
    let user_id = new.user_id.get();
    let now = Utc::now();

    if new.channel_id.is_some() {
        state.voice.start(guild_id, user_id, now).await;
        return;
    }

    let Some(minutes) = state.voice.end(guild_id, user_id, now).await else {
        return;
    };
    if minutes == 0 {
        return;
    }

    tracing::debug!(
        "User {} left voice in guild {} after {} minutes",
        user_id,
        guild_id,
        minutes
    );

    let event = QuestEvent::new(guild_id, user_id, now, QuestTrigger::VoiceMinutes(minutes));
    if let Err(e) = state.ledger.ingest(event).await {
        tracing::error!(
            "Failed to record voice quest progress for user {}: {}",
            user_id,
            e
        );
    }
}
