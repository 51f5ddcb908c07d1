//! Claim notifications.
//!
//! Delivery is best-effort: a claim is final once its points are credited, and a sink
//! failure is only logged.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::{
    all::{ChannelId, CreateMessage, UserId},
    http::Http,
};

use crate::server::{
    error::AppError,
    model::claim::{ClaimOutcome, QuestNotification},
};

/// Receiver of claimed-quest notifications.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, notification: &QuestNotification) -> Result<(), AppError>;
}

/// Posts notifications to a log channel, or to the member's DMs without one.
pub struct DiscordNotificationSink {
    http: Arc<Http>,
    channel_id: Option<u64>,
}

impl DiscordNotificationSink {
    /// Creates a new DiscordNotificationSink.
    ///
    /// # Arguments
    /// - `http` - Discord HTTP client
    /// - `channel_id` - Log channel; `None` sends each notification as a DM
    ///
    /// # Returns
    /// - `DiscordNotificationSink` - New sink instance
    pub fn new(http: Arc<Http>, channel_id: Option<u64>) -> Self {
        Self { http, channel_id }
    }
}

#[async_trait]
impl NotificationSink for DiscordNotificationSink {
    async fn notify(&self, notification: &QuestNotification) -> Result<(), AppError> {
        let message = CreateMessage::new().content(format_notification(notification));

        let channel_id = match self.channel_id {
            Some(id) => ChannelId::new(id),
            None => {
                UserId::new(notification.user_id)
                    .create_dm_channel(&self.http)
                    .await?
                    .id
            }
        };

        channel_id.send_message(&self.http, message).await?;

        Ok(())
    }
}

/// Renders one notification as a plain text line.
pub fn format_notification(notification: &QuestNotification) -> String {
    format!(
        "<@{}> completed the {} quest **{}** (+{} points, total {})",
        notification.user_id,
        notification.bucket,
        notification.quest_name,
        notification.base_reward,
        notification.new_total
    )
}

/// Sends one notification per claimed quest.
///
/// Failures are logged and skipped; the remaining notifications are still attempted.
///
/// # Returns
/// - `usize` - Number of notifications delivered
pub async fn notify_claims(sink: &dyn NotificationSink, outcome: &ClaimOutcome) -> usize {
    let Some(new_total) = outcome.new_total else {
        return 0;
    };

    let mut delivered = 0;
    for quest in &outcome.claimed {
        let notification = QuestNotification {
            guild_id: outcome.guild_id,
            user_id: outcome.user_id,
            bucket: quest.bucket,
            quest_name: quest.quest_name.clone(),
            base_reward: quest.base_reward,
            new_total,
        };

        match sink.notify(&notification).await {
            Ok(()) => delivered += 1,
            Err(e) => tracing::warn!(
                "Failed to notify user {} about quest {}: {}",
                outcome.user_id,
                quest.quest_key,
                e
            ),
        }
    }

    delivered
}
