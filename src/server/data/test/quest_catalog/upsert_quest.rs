use super::*;

fn entry(name: &str, target: u32) -> QuestEntry {
    QuestEntry {
        name: name.to_string(),
        kind: QuestKind::CommandUse {
            command: Some("daily".to_string()),
        },
        target,
        reward: 5,
        reset: None,
        max_claims_per_reset: 1,
    }
}

/// Tests adding, replacing and removing a quest.
///
/// Expected: each edit is visible to the next load; unrelated entries are kept
#[tokio::test]
async fn edits_round_trip() -> Result<(), AppError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("quests.json");
    tokio::fs::write(
        &path,
        json!({ "weekly": { "keep": { "name": "Keep", "type": "invites", "target": 2 } } })
            .to_string(),
    )
    .await?;
    let repo = QuestCatalogRepository::new(&path);

    repo.upsert_quest(Bucket::Weekly, "use_daily", entry("Use /daily", 3))
        .await?;
    let quest = repo
        .upsert_quest(Bucket::Weekly, "use_daily", entry("Use /daily often", 5))
        .await?;
    assert_eq!(quest.reset, ResetCadence::Weekly);

    let catalog = repo.load().await?;
    assert_eq!(catalog.keys(Bucket::Weekly), vec!["keep", "use_daily"]);
    let stored = catalog.get(Bucket::Weekly, "use_daily").unwrap();
    assert_eq!(stored.name, "Use /daily often");
    assert_eq!(stored.target, 5);

    assert!(repo.remove_quest(Bucket::Weekly, "use_daily").await?);
    assert!(!repo.remove_quest(Bucket::Weekly, "use_daily").await?);
    assert_eq!(repo.load().await?.keys(Bucket::Weekly), vec!["keep"]);

    Ok(())
}

/// Tests adding an entry that fails validation.
///
/// Expected: Err(BadRequest) and the document left as it was
#[tokio::test]
async fn rejects_invalid_entry() -> Result<(), AppError> {
    let dir = tempfile::tempdir()?;
    let repo = QuestCatalogRepository::new(dir.path().join("quests.json"));

    let result = repo
        .upsert_quest(Bucket::Daily, "broken", entry("Broken", 0))
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert!(repo.load().await?.is_empty());

    Ok(())
}
