use super::*;

/// Tests loading from a path that was never written.
///
/// Expected: Ok with an empty tree
#[tokio::test]
async fn missing_file_reads_empty() -> Result<(), AppError> {
    let dir = tempfile::tempdir()?;
    let backend = JsonFileBackend::new(dir.path().join("progress.json"));

    assert_eq!(backend.load().await?, ProgressTree::new());

    Ok(())
}

/// Tests the on-disk layout of a saved tree.
///
/// Expected: bucket → period → guild → user → quest nesting with a sibling `__assigned`
#[tokio::test]
async fn writes_nested_layout() -> Result<(), AppError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("data").join("progress.json");
    let store = ProgressStore::json_file(&path);

    store
        .mutate(|tree| {
            let user = tree.user_mut(Bucket::Daily, "2025-06-01", 10, 20);
            user.assigned = Some(vec!["chatter".to_string(), "say_gm".to_string()]);
            user.entry_mut("chatter").advance(4, 20);
        })
        .await?;

    let raw: serde_json::Value = serde_json::from_slice(&tokio::fs::read(&path).await?)?;
    let user = &raw["daily"]["2025-06-01"]["10"]["20"];
    assert_eq!(user["__assigned"], serde_json::json!(["chatter", "say_gm"]));
    assert_eq!(user["chatter"], serde_json::json!({ "progress": 4, "claimed": 0 }));

    let reloaded = JsonFileBackend::new(&path).load().await?;
    assert_eq!(reloaded, store.get().await?);
    assert_eq!(
        reloaded.assigned(Bucket::Daily, "2025-06-01", 10, 20),
        Some(&["chatter".to_string(), "say_gm".to_string()][..])
    );

    Ok(())
}

/// Tests loading a file that is not valid JSON.
///
/// Expected: Err(JsonErr)
#[tokio::test]
async fn corrupt_file_is_an_error() -> Result<(), AppError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("progress.json");
    tokio::fs::write(&path, b"{ not json").await?;

    let result = JsonFileBackend::new(&path).load().await;

    assert!(matches!(result, Err(AppError::JsonErr(_))));

    Ok(())
}
