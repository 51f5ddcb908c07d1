//! Splitting open voice sessions at UTC midnight.

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::Mutex;

use crate::server::{
    error::AppError,
    model::quest_event::{QuestEvent, QuestTrigger},
    service::{
        quest::period::{last_instant_before, start_of_day},
        voice::VoiceTracker,
    },
};

use super::QuestLedger;

/// Edge-triggered detector of UTC date changes.
///
/// Each date change is reported once, however often `detect` is polled.
pub struct RolloverSweep {
    last_date: Mutex<NaiveDate>,
}

impl RolloverSweep {
    /// Creates a detector whose baseline is the date of `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            last_date: Mutex::new(now.date_naive()),
        }
    }

    /// Checks whether the UTC date advanced since the last call.
    ///
    /// # Returns
    /// - `Some(rollover)` - Midnight of the new date; reported once per change
    /// - `None` - Same date as last seen, or the clock went backwards
    pub async fn detect(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let mut last_date = self.last_date.lock().await;
        let today = now.date_naive();

        if today <= *last_date {
            return None;
        }

        *last_date = today;
        Some(start_of_day(now))
    }
}

impl QuestLedger {
    /// Runs one rollover tick.
    ///
    /// When the date advanced, every open voice session is cut at midnight and the minutes
    /// before it are credited to the periods that just ended. A tick on an unchanged date
    /// does nothing, so repeated or skipped ticks never credit time twice.
    ///
    /// # Arguments
    /// - `sweep` - Date change detector shared across ticks
    /// - `voice` - Open voice sessions
    /// - `now` - Current instant
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of sessions split
    /// - `Err(AppError)` - Crediting one of the sessions failed; the others were still
    ///   attempted
    pub async fn sweep_rollover(
        &self,
        sweep: &RolloverSweep,
        voice: &VoiceTracker,
        now: DateTime<Utc>,
    ) -> Result<usize, AppError> {
        let Some(rollover) = sweep.detect(now).await else {
            return Ok(0);
        };

        let splits = voice.split_at(rollover).await;
        let credited_at = last_instant_before(rollover);
        let mut first_error = None;

        for split in &splits {
            if split.minutes == 0 {
                continue;
            }

            let event = QuestEvent::new(
                split.guild_id,
                split.user_id,
                credited_at,
                QuestTrigger::VoiceMinutes(split.minutes),
            );
            if let Err(e) = self.ingest(event).await {
                tracing::error!(
                    "Failed to credit {} voice minutes to user {} in guild {} at rollover: {}",
                    split.minutes,
                    split.user_id,
                    split.guild_id,
                    e
                );
                first_error.get_or_insert(e);
            }
        }

        tracing::info!(
            "Day rolled over to {}, split {} open voice sessions",
            rollover.date_naive(),
            splits.len()
        );

        match first_error {
            Some(e) => Err(e),
            None => Ok(splits.len()),
        }
    }
}
