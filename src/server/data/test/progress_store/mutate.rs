use super::*;

/// Tests that a change is saved and visible to later reads.
///
/// Expected: Ok with one save and the entry present in both the snapshot and backend
#[tokio::test]
async fn persists_changes() -> Result<(), AppError> {
    let backend = Arc::new(MemoryBackend::new());
    let store = ProgressStore::new(backend.clone());

    store
        .mutate(|tree| {
            tree.user_mut(Bucket::Daily, "2025-06-01", 1, 2)
                .entry_mut("chatter")
                .advance(3, 10);
        })
        .await?;

    assert_eq!(backend.save_count(), 1);
    let snapshot = store.get().await?;
    assert_eq!(snapshot.entry(Bucket::Daily, "2025-06-01", 1, 2, "chatter").progress, 3);
    assert_eq!(backend.saved().await, snapshot);

    Ok(())
}

/// Tests that a closure which changes nothing does not write.
///
/// Expected: Ok with the closure's result and no save
#[tokio::test]
async fn skips_write_when_unchanged() -> Result<(), AppError> {
    let backend = Arc::new(MemoryBackend::new());
    let store = ProgressStore::new(backend.clone());

    let seen = store
        .mutate(|tree| tree.user(Bucket::Daily, "2025-06-01", 1, 2).is_some())
        .await?;

    assert!(!seen);
    assert_eq!(backend.save_count(), 0);

    Ok(())
}

/// Tests a failing save.
///
/// Expected: Err, with neither the backend nor later snapshots seeing the change
#[tokio::test]
async fn keeps_previous_tree_when_save_fails() -> Result<(), AppError> {
    let backend = Arc::new(MemoryBackend::new());
    let store = ProgressStore::new(backend.clone());

    store
        .mutate(|tree| {
            tree.user_mut(Bucket::Weekly, "2025-W22", 1, 2)
                .entry_mut("chatter")
                .advance(1, 10);
        })
        .await?;

    backend.fail_saves(true);
    let result = store
        .mutate(|tree| {
            tree.user_mut(Bucket::Weekly, "2025-W22", 1, 2)
                .entry_mut("chatter")
                .advance(5, 10);
        })
        .await;
    assert!(matches!(result, Err(AppError::IoErr(_))));

    let snapshot = store.get().await?;
    assert_eq!(snapshot.entry(Bucket::Weekly, "2025-W22", 1, 2, "chatter").progress, 1);
    assert_eq!(backend.saved().await, snapshot);

    backend.fail_saves(false);
    store
        .mutate(|tree| {
            tree.user_mut(Bucket::Weekly, "2025-W22", 1, 2)
                .entry_mut("chatter")
                .advance(2, 10);
        })
        .await?;
    assert_eq!(
        store.get().await?.entry(Bucket::Weekly, "2025-W22", 1, 2, "chatter").progress,
        3
    );

    Ok(())
}

/// Tests many concurrent increments through clones of one store.
///
/// Expected: Ok with no increment lost
#[tokio::test]
async fn serializes_concurrent_mutations() -> Result<(), AppError> {
    let store = ProgressStore::new(Arc::new(MemoryBackend::new()));

    let mut handles = Vec::new();
    for _ in 0..25 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .mutate(|tree| {
                    tree.user_mut(Bucket::Lifetime, "lifetime", 1, 2)
                        .entry_mut("veteran")
                        .advance(1, 1000);
                })
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap()?;
    }

    let progress = store
        .get()
        .await?
        .entry(Bucket::Lifetime, "lifetime", 1, 2, "veteran")
        .progress;
    assert_eq!(progress, 25);

    Ok(())
}
