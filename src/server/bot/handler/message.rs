use serenity::all::{Context, Message};

use crate::server::{
    model::quest_event::{QuestEvent, QuestTrigger},
    state::AppState,
};

/// Handle message creation in a guild channel
///
/// Feeds the `messages`, `messages_time_window` and `message_exact` quests of the author.
pub async fn handle_message(state: &AppState, _ctx: Context, message: Message) {
    if message.author.bot {
        return;
    }

    // DMs never count
    let Some(guild_id) = message.guild_id else {
        return;
    };

    let event = QuestEvent::new(
        guild_id.get(),
        message.author.id.get(),
        message.timestamp.to_utc(),
        QuestTrigger::Message {
            channel_id: message.channel_id.get(),
            content: message.content,
        },
    );

    if let Err(e) = state.ledger.ingest(event).await {
        tracing::error!(
            "Failed to record message quest progress for user {}: {}",
            message.author.id,
            e
        );
    }
}
