use super::*;

/// Tests removing the referral of a member who leaves.
///
/// Expected: Ok(Some) naming the inviter, whose count drops
#[tokio::test]
async fn removes_and_returns_referral() -> Result<(), AppError> {
    let test = TestBuilder::new().with_invite_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_referral(db, 1, 100, 7).await?;
    factory::create_referral(db, 1, 101, 7).await?;

    let repo = InviteRepository::new(db);
    let removed = repo.remove_referral(1, 100).await?;

    assert_eq!(removed.map(|r| r.inviter_id), Some(7));
    assert_eq!(repo.invite_count(1, 7).await?, 1);

    Ok(())
}

/// Tests removing a member nobody invited.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_without_referral() -> Result<(), AppError> {
    let test = TestBuilder::new().with_invite_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = InviteRepository::new(db);

    assert!(repo.remove_referral(1, 100).await?.is_none());

    Ok(())
}
