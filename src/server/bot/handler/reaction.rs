//! Reaction handler.
//!
//! Every reaction counts toward the reactor's `reaction_total` quests. When the reactor
//! holds one of the configured moderator roles, the reaction also counts toward the
//! message author's `reaction_mod` quests.

use chrono::Utc;
use serenity::all::{Context, Reaction, RoleId};

use crate::server::{
    model::quest_event::{QuestEvent, QuestTrigger},
    state::AppState,
};

/// Handles the reaction_add event
///
/// # Arguments
/// - `state` - Shared application state
/// - `ctx` - Discord context for member and message lookups
/// - `reaction` - The added reaction
pub async fn handle_reaction_add(state: &AppState, ctx: Context, reaction: Reaction) {
    let (Some(guild_id), Some(reactor_id)) = (reaction.guild_id, reaction.user_id) else {
        return;
    };

    // Guild reactions normally carry the member; fetch only when it is missing
    let reactor = match reaction.member.clone() {
        Some(member) => member,
        None => match guild_id.member(&ctx, reactor_id).await {
            Ok(member) => member,
            Err(e) => {
                tracing::error!("Failed to fetch reacting member {}: {}", reactor_id, e);
                return;
            }
        },
    };
    if reactor.user.bot {
        return;
    }

    let now = Utc::now();

    let event = QuestEvent::new(
        guild_id.get(),
        reactor_id.get(),
        now,
        QuestTrigger::ReactionAdded,
    );
    if let Err(e) = state.ledger.ingest(event).await {
        tracing::error!(
            "Failed to record reaction quest progress for user {}: {}",
            reactor_id,
            e
        );
    }

    if !is_moderator(&state.moderator_role_ids, &reactor.roles) {
        return;
    }

    let message = match reaction.message(&ctx).await {
        Ok(message) => message,
        Err(e) => {
            tracing::error!(
                "Failed to fetch message {} for moderator reaction: {}",
                reaction.message_id,
                e
            );
            return;
        }
    };

    // Moderators cannot reward themselves
    if message.author.bot || message.author.id == reactor_id {
        return;
    }

    let event = QuestEvent::new(
        guild_id.get(),
        message.author.id.get(),
        now,
        QuestTrigger::ModeratorReaction,
    );
    if let Err(e) = state.ledger.ingest(event).await {
        tracing::error!(
            "Failed to record moderator reaction quest progress for user {}: {}",
            message.author.id,
            e
        );
    }
}

/// Whether any of the member's roles is a configured moderator role.
fn is_moderator(moderator_role_ids: &[u64], roles: &[RoleId]) -> bool {
    roles
        .iter()
        .any(|role| moderator_role_ids.contains(&role.get()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_moderator_roles() {
        let roles = [RoleId::new(10), RoleId::new(20)];

        assert!(is_moderator(&[20, 30], &roles));
        assert!(!is_moderator(&[30], &roles));
        assert!(!is_moderator(&[], &roles));
    }
}
