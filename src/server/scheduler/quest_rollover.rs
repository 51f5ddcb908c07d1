use std::sync::Arc;

use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    service::{
        quest::{rollover::RolloverSweep, QuestLedger},
        voice::VoiceTracker,
    },
};

/// Starts the quest rollover scheduler
///
/// Runs every minute. When the UTC date has advanced since the previous tick, every open
/// voice session is split at midnight and the minutes before it are credited to the
/// period that just ended.
///
/// # Arguments
/// - `ledger`: Quest ledger the split minutes are ingested into
/// - `voice`: Voice presence tracker shared with the bot's voice handler
pub async fn start_scheduler(ledger: QuestLedger, voice: VoiceTracker) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let sweep = Arc::new(RolloverSweep::new(Utc::now()));

    let job = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let ledger = ledger.clone();
        let voice = voice.clone();
        let sweep = sweep.clone();

        Box::pin(async move {
            if let Err(e) = ledger.sweep_rollover(&sweep, &voice, Utc::now()).await {
                tracing::error!("Error sweeping quest rollover: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Quest rollover scheduler started");

    Ok(())
}
