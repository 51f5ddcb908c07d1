use super::*;

/// Tests getting the tier of a member without one.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_without_tier() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberTier)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = TierRepository::new(db);

    assert!(repo.get(42).await?.is_none());

    Ok(())
}

/// Tests getting a stored tier.
///
/// Expected: Ok(Some) with the parsed tier
#[tokio::test]
async fn parses_stored_tier() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberTier)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_member_tier(db, 42, "silver").await?;

    let repo = TierRepository::new(db);
    let tier = repo.get(42).await?.unwrap();

    assert_eq!(tier.user_id, 42);
    assert_eq!(tier.tier, Tier::Silver);

    Ok(())
}

/// Tests a row holding a tier name the bot does not know.
///
/// Expected: Err(InternalErr(UnknownTier))
#[tokio::test]
async fn rejects_unknown_tier() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::MemberTier)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_member_tier(db, 42, "platinum").await?;

    let repo = TierRepository::new(db);
    let result = repo.get(42).await;

    assert!(matches!(
        result,
        Err(AppError::InternalErr(InternalError::UnknownTier { user_id: 42, .. }))
    ));

    Ok(())
}
