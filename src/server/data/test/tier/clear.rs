use super::*;

/// Tests clearing tiers.
///
/// Expected: Ok(true) when a tier existed, Ok(false) afterwards
#[tokio::test]
async fn clears_tier() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberTier)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_member_tier(db, 42, "gold").await?;

    let repo = TierRepository::new(db);

    assert!(repo.clear(42).await?);
    assert!(!repo.clear(42).await?);
    assert!(repo.get(42).await?.is_none());

    Ok(())
}
