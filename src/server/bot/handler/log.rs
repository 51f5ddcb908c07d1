//! Plain text lines posted to the configured log channels.

use serenity::all::{ChannelId, Context, CreateMessage};

/// Posts `line` to a log channel; does nothing when the channel is not configured.
///
/// Failures are logged and swallowed.
pub async fn post_log(ctx: &Context, channel_id: Option<u64>, line: String) {
    let Some(channel_id) = channel_id else {
        return;
    };

    if let Err(e) = ChannelId::new(channel_id)
        .send_message(&ctx.http, CreateMessage::new().content(line))
        .await
    {
        tracing::warn!("Failed to post to log channel {}: {}", channel_id, e);
    }
}
