use super::*;

/// Tests assigning and then replacing a tier.
///
/// Expected: Ok with the latest tier stored in a single row
#[tokio::test]
async fn assigns_and_replaces_tier() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberTier)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TierRepository::new(db);
    repo.set(42, Tier::Bronze).await?;
    repo.set(42, Tier::Gold).await?;

    assert_eq!(repo.get(42).await?.map(|t| t.tier), Some(Tier::Gold));

    Ok(())
}
