use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};
use tempfile::TempDir;
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    data::{
        progress_store::{MemoryBackend, ProgressStore},
        quest_catalog::QuestCatalogRepository,
    },
    error::AppError,
    model::{
        claim::ResetScope,
        quest::{Bucket, QuestEntry, QuestKind, QuestSettings, RotatingBucket},
        quest_event::{QuestEvent, QuestTrigger},
        tier::TierMultipliers,
    },
    service::{
        quest::{period::period_key, rollover::RolloverSweep, QuestLedger, QuestService},
        voice::VoiceTracker,
    },
};

mod ingest;

/// A ledger over an in-memory progress store and a catalog file in a temp directory.
struct TestLedger {
    ledger: QuestLedger,
    backend: Arc<MemoryBackend>,
    _dir: TempDir,
}

/// Builds a ledger whose catalog document is `catalog`.
async fn ledger_with(catalog: Value, assignment_size: usize) -> TestLedger {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quests.json");
    tokio::fs::write(&path, serde_json::to_vec(&catalog).unwrap())
        .await
        .unwrap();

    let backend = Arc::new(MemoryBackend::new());
    let ledger = QuestLedger::new(
        ProgressStore::new(backend.clone()),
        QuestCatalogRepository::new(path),
        QuestSettings {
            assignment_size,
            seed_salt: 17,
        },
    );

    TestLedger {
        ledger,
        backend,
        _dir: dir,
    }
}

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, day, hour, minute, 0).unwrap()
}

fn message(guild_id: u64, user_id: u64, when: DateTime<Utc>, content: &str) -> QuestEvent {
    QuestEvent::new(
        guild_id,
        user_id,
        when,
        QuestTrigger::Message {
            channel_id: 500,
            content: content.to_string(),
        },
    )
}

/// Reads one progress entry straight from the store.
async fn progress(
    ledger: &QuestLedger,
    bucket: Bucket,
    when: DateTime<Utc>,
    user_id: u64,
    quest_key: &str,
) -> u32 {
    let tree = ledger.store().get().await.unwrap();
    tree.entry(bucket, &period_key(bucket, when), 1, user_id, quest_key)
        .progress
}
