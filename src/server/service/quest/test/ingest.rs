use super::*;

/// Tests that one message reaches every bucket.
///
/// Expected: Ok with one update per bucket, each at progress 1
#[tokio::test]
async fn advances_quests_in_every_bucket() -> Result<(), AppError> {
    let test = ledger_with(
        json!({
            "daily": { "chatter": { "name": "Chat", "type": "messages", "target": 3, "reward": 5 } },
            "weekly": { "chatter": { "name": "Chat", "type": "messages", "target": 10, "reward": 20 } },
            "lifetime": { "veteran": { "name": "Vet", "type": "messages", "target": 100, "reward": 50 } }
        }),
        3,
    )
    .await;
    let now = at(3, 12, 0);

    let updates = test.ledger.ingest(message(1, 2, now, "hello")).await?;

    assert_eq!(updates.len(), 3);
    assert_eq!(progress(&test.ledger, Bucket::Daily, now, 2, "chatter").await, 1);
    assert_eq!(progress(&test.ledger, Bucket::Weekly, now, 2, "chatter").await, 1);
    assert_eq!(progress(&test.ledger, Bucket::Lifetime, now, 2, "veteran").await, 1);
    assert_eq!(test.backend.save_count(), 1);

    Ok(())
}

/// Tests the clamp at the quest target.
///
/// Expected: progress stops at 3 and further messages report no update
#[tokio::test]
async fn clamps_progress_at_target() -> Result<(), AppError> {
    let test = ledger_with(
        json!({ "daily": { "chatter": { "name": "Chat", "type": "messages", "target": 3, "reward": 5 } } }),
        3,
    )
    .await;
    let now = at(3, 12, 0);

    for _ in 0..3 {
        test.ledger.ingest(message(1, 2, now, "hi")).await?;
    }
    let saves = test.backend.save_count();
    let extra = test.ledger.ingest(message(1, 2, now, "hi")).await?;

    assert!(extra.is_empty());
    assert_eq!(progress(&test.ledger, Bucket::Daily, now, 2, "chatter").await, 3);
    assert_eq!(test.backend.save_count(), saves);

    Ok(())
}

/// Tests that only assigned daily quests advance.
///
/// Expected: exactly the two assigned quests of four matching ones move
#[tokio::test]
async fn skips_unassigned_quests() -> Result<(), AppError> {
    let quest = json!({ "name": "Chat", "type": "messages", "target": 5, "reward": 1 });
    let test = ledger_with(
        json!({ "daily": { "a": quest, "b": quest, "c": quest, "d": quest } }),
        2,
    )
    .await;
    let now = at(3, 12, 0);

    let updates = test.ledger.ingest(message(1, 2, now, "hi")).await?;
    let assigned = test
        .ledger
        .ensure_assignment(RotatingBucket::Daily, &period_key(Bucket::Daily, now), 1, 2)
        .await?;

    assert_eq!(assigned.len(), 2);
    let mut moved: Vec<String> = updates.into_iter().map(|u| u.quest_key).collect();
    moved.sort();
    assert_eq!(moved, assigned);

    Ok(())
}

/// Tests an event no quest cares about.
///
/// Expected: Ok with no updates and nothing written, not even an assignment
#[tokio::test]
async fn irrelevant_event_does_not_write() -> Result<(), AppError> {
    let test = ledger_with(
        json!({ "daily": { "voice": { "name": "Talk", "type": "voice_minutes", "target": 30 } } }),
        3,
    )
    .await;

    let updates = test.ledger.ingest(message(1, 2, at(3, 12, 0), "hi")).await?;

    assert!(updates.is_empty());
    assert_eq!(test.backend.save_count(), 0);

    Ok(())
}

/// Tests that periods keep separate counters.
///
/// Expected: messages either side of midnight Sunday to Monday land in different
/// daily and weekly periods
#[tokio::test]
async fn periods_are_isolated() -> Result<(), AppError> {
    let test = ledger_with(
        json!({
            "daily": { "chatter": { "name": "Chat", "type": "messages", "target": 10 } },
            "weekly": { "chatter": { "name": "Chat", "type": "messages", "target": 10 } }
        }),
        3,
    )
    .await;
    let sunday = at(1, 23, 59);
    let monday = at(2, 0, 1);

    test.ledger.ingest(message(1, 2, sunday, "late")).await?;
    test.ledger.ingest(message(1, 2, monday, "early")).await?;
    test.ledger.ingest(message(1, 2, monday, "again")).await?;

    assert_eq!(progress(&test.ledger, Bucket::Daily, sunday, 2, "chatter").await, 1);
    assert_eq!(progress(&test.ledger, Bucket::Daily, monday, 2, "chatter").await, 2);
    assert_eq!(progress(&test.ledger, Bucket::Weekly, sunday, 2, "chatter").await, 1);
    assert_eq!(progress(&test.ledger, Bucket::Weekly, monday, 2, "chatter").await, 2);

    Ok(())
}

/// Tests one-shot and time-window quests through ingestion.
///
/// Expected: the exact message completes its quest at once; the night quest only
/// counts the message sent inside its window
#[tokio::test]
async fn one_shot_and_window_quests() -> Result<(), AppError> {
    let test = ledger_with(
        json!({
            "daily": {
                "say_gm": { "name": "Say gm", "type": "message_exact", "text": "gm", "target": 3 },
                "night_owl": {
                    "name": "Night owl", "type": "messages_time_window",
                    "timezone": "UTC", "start_hour": 22, "end_hour": 2, "target": 5
                }
            }
        }),
        3,
    )
    .await;
    let noon = at(3, 12, 0);
    let late = at(3, 23, 0);

    test.ledger.ingest(message(1, 2, noon, " gm ")).await?;
    test.ledger.ingest(message(1, 2, late, "still up")).await?;

    assert_eq!(progress(&test.ledger, Bucket::Daily, noon, 2, "say_gm").await, 3);
    assert_eq!(progress(&test.ledger, Bucket::Daily, noon, 2, "night_owl").await, 1);

    Ok(())
}

/// Tests concurrent ingestion for one user.
///
/// Expected: no update is lost across 40 concurrent messages
#[tokio::test]
async fn concurrent_events_are_not_lost() -> Result<(), AppError> {
    let test = ledger_with(
        json!({ "lifetime": { "veteran": { "name": "Vet", "type": "messages", "target": 100 } } }),
        3,
    )
    .await;
    let now = at(3, 12, 0);

    let handles: Vec<_> = (0..40)
        .map(|_| {
            let ledger = test.ledger.clone();
            tokio::spawn(async move { ledger.ingest(message(1, 2, now, "spam")).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap()?;
    }

    assert_eq!(progress(&test.ledger, Bucket::Lifetime, now, 2, "veteran").await, 40);

    Ok(())
}

/// Tests a failed save during ingestion.
///
/// Expected: Err, and the progress is not visible afterwards
#[tokio::test]
async fn failed_save_drops_the_event() -> Result<(), AppError> {
    let test = ledger_with(
        json!({ "lifetime": { "veteran": { "name": "Vet", "type": "messages", "target": 100 } } }),
        3,
    )
    .await;
    let now = at(3, 12, 0);
    test.backend.fail_saves(true);

    let result = test.ledger.ingest(message(1, 2, now, "hi")).await;

    assert!(result.is_err());
    assert_eq!(progress(&test.ledger, Bucket::Lifetime, now, 2, "veteran").await, 0);

    Ok(())
}
