use super::*;

/// Tests that every quest of the default catalog is valid.
///
/// Expected: no entry of the default document is skipped
#[test]
fn default_catalog_is_fully_valid() {
    let document: serde_json::Value = serde_json::from_str(DEFAULT_CATALOG).unwrap();
    let written: usize = document
        .as_object()
        .unwrap()
        .values()
        .map(|quests| quests.as_object().unwrap().len())
        .sum();

    let catalog = parse_catalog(&document);

    assert_eq!(catalog.len(), written);
    assert!(catalog.get(Bucket::Weekly, "completionist").unwrap().is_meta());
}

/// Tests lenient parsing of a catalog with broken entries.
///
/// Expected: only the valid entries survive; the document as a whole still loads
#[test]
fn skips_invalid_entries() {
    let document = json!({
        "daily": {
            "ok": { "name": "Chat", "type": "messages", "target": 5, "reward": 1 },
            "zero_target": { "name": "Nothing", "type": "messages", "target": 0 },
            "unknown_type": { "name": "Dance", "type": "dance", "target": 1 },
            "wrong_reset": { "name": "Chat", "type": "messages", "target": 5, "reset": "weekly" },
            "bad_hour": {
                "name": "Late", "type": "messages_time_window",
                "timezone": "UTC", "start_hour": 25, "end_hour": 2, "target": 1
            },
            "bad_zone": {
                "name": "Late", "type": "messages_time_window",
                "timezone": "Mars/Olympus", "start_hour": 1, "end_hour": 2, "target": 1
            },
            "missing_name": { "type": "messages", "target": 5 },
            "blank_text": { "name": "Say", "type": "message_exact", "text": "  ", "target": 1 }
        },
        "monthly": {
            "ignored": { "name": "Chat", "type": "messages", "target": 5 }
        },
        "weekly": "not an object"
    });

    let catalog = parse_catalog(&document);

    assert_eq!(catalog.keys(Bucket::Daily), vec!["ok"]);
    assert!(catalog.bucket(Bucket::Weekly).is_empty());
    assert_eq!(catalog.len(), 1);
}

/// Tests defaults filled in for optional fields.
///
/// Expected: reset follows the bucket, one claim per reset, reward zero
#[test]
fn fills_defaults() {
    let document = json!({
        "lifetime": {
            "booster": { "name": "Boost", "type": "server_boost", "target": 1 }
        }
    });

    let catalog = parse_catalog(&document);
    let quest = catalog.get(Bucket::Lifetime, "booster").unwrap();

    assert_eq!(quest.reset, ResetCadence::Permanent);
    assert_eq!(quest.max_claims_per_reset, 1);
    assert_eq!(quest.reward, 0);
    assert_eq!(quest.kind, QuestKind::ServerBoost);
}

/// Tests loading when the catalog file does not exist.
///
/// Expected: Ok with an empty catalog
#[tokio::test]
async fn missing_file_is_empty() -> Result<(), AppError> {
    let dir = tempfile::tempdir()?;
    let repo = QuestCatalogRepository::new(dir.path().join("quests.json"));

    assert!(repo.load().await?.is_empty());

    Ok(())
}

/// Tests that the catalog is read again on every load.
///
/// Expected: an edit made to the file between loads is visible to the second load
#[tokio::test]
async fn picks_up_edits_without_restart() -> Result<(), AppError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("quests.json");
    let repo = QuestCatalogRepository::new(&path);

    tokio::fs::write(
        &path,
        json!({ "daily": { "a": { "name": "A", "type": "messages", "target": 1 } } }).to_string(),
    )
    .await?;
    assert_eq!(repo.load().await?.keys(Bucket::Daily), vec!["a"]);

    tokio::fs::write(
        &path,
        json!({ "daily": { "b": { "name": "B", "type": "messages", "target": 1 } } }).to_string(),
    )
    .await?;
    assert_eq!(repo.load().await?.keys(Bucket::Daily), vec!["b"]);

    Ok(())
}
