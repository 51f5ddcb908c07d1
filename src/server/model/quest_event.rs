//! Events fed into the quest ledger by the bot's gateway handlers.

use chrono::{DateTime, Utc};

use crate::server::model::quest::Bucket;

/// What happened, as far as quest matching is concerned.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestTrigger {
    /// The user sent a message.
    Message { channel_id: u64, content: String },
    /// The user finished (or had split at midnight) a voice session of this many minutes.
    VoiceMinutes(u32),
    /// A member joined through one of the user's invites.
    InviteAccepted,
    /// The user invoked a slash command.
    Command { name: String },
    /// The user added a reaction.
    ReactionAdded,
    /// A moderator reacted to one of the user's messages.
    ModeratorReaction,
    /// The user claimed the daily login reward.
    DailyClaim,
    /// The user started boosting the guild.
    ServerBoost,
    /// An admin validated a manual quest for the user.
    ManualValidation { bucket: Bucket, quest_key: String },
}

/// A trigger attributed to one member of one guild at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestEvent {
    pub guild_id: u64,
    pub user_id: u64,
    /// Instant the event is accounted at; selects the period keys it lands in.
    pub at: DateTime<Utc>,
    pub trigger: QuestTrigger,
}

impl QuestEvent {
    pub fn new(guild_id: u64, user_id: u64, at: DateTime<Utc>, trigger: QuestTrigger) -> Self {
        Self {
            guild_id,
            user_id,
            at,
            trigger,
        }
    }
}

/// A single quest whose progress moved because of an event.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub bucket: Bucket,
    pub period_key: String,
    pub quest_key: String,
    pub progress: u32,
    pub target: u32,
}

impl ProgressUpdate {
    pub fn is_complete(&self) -> bool {
        self.progress >= self.target
    }
}
