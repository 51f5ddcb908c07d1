use super::*;

/// Tests writing the default catalog on first start.
///
/// Expected: Ok(true) once, then Ok(false) without touching the existing file
#[tokio::test]
async fn writes_default_only_once() -> Result<(), AppError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config").join("quests.json");
    let repo = QuestCatalogRepository::new(&path);

    assert!(repo.ensure_default().await?);
    assert!(!repo.load().await?.is_empty());

    tokio::fs::write(&path, "{}").await?;
    assert!(!repo.ensure_default().await?);
    assert!(repo.load().await?.is_empty());

    Ok(())
}
