use super::*;

/// Tests that a member pays out an invite reward only once.
///
/// Expected: Ok(true) the first time, Ok(false) afterwards even for another inviter
#[tokio::test]
async fn rewards_member_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_invite_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = InviteRepository::new(db);

    assert!(repo.record_reward(1, 100, 7, Utc::now()).await?);
    assert!(!repo.record_reward(1, 100, 7, Utc::now()).await?);
    assert!(!repo.record_reward(1, 100, 8, Utc::now()).await?);

    Ok(())
}

/// Tests that the once-only rule is scoped to a guild.
///
/// Expected: Ok(true) for the same member joining another guild
#[tokio::test]
async fn rewards_per_guild() -> Result<(), AppError> {
    let test = TestBuilder::new().with_invite_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = InviteRepository::new(db);

    assert!(repo.record_reward(1, 100, 7, Utc::now()).await?);
    assert!(repo.record_reward(2, 100, 7, Utc::now()).await?);

    Ok(())
}
