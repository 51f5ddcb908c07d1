use super::*;

/// Tests recording a referral for a new member.
///
/// Expected: Ok with the inviter's count incremented
#[tokio::test]
async fn counts_new_referral() -> Result<(), AppError> {
    let test = TestBuilder::new().with_invite_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = InviteRepository::new(db);
    let referral = repo.record_referral(1, 100, 7, Utc::now()).await?;

    assert_eq!(referral.guild_id, 1);
    assert_eq!(referral.member_id, 100);
    assert_eq!(referral.inviter_id, 7);
    assert_eq!(repo.invite_count(1, 7).await?, 1);

    Ok(())
}

/// Tests recording a referral for a member who already has one in the guild.
///
/// Expected: Ok with the old inviter losing the referral to the new one
#[tokio::test]
async fn replaces_previous_referral() -> Result<(), AppError> {
    let test = TestBuilder::new().with_invite_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_referral(db, 1, 100, 7).await?;

    let repo = InviteRepository::new(db);
    repo.record_referral(1, 100, 8, Utc::now()).await?;

    assert_eq!(repo.invite_count(1, 7).await?, 0);
    assert_eq!(repo.invite_count(1, 8).await?, 1);

    Ok(())
}

/// Tests that referrals are counted per guild.
///
/// Expected: Ok with each guild counting only its own referrals
#[tokio::test]
async fn counts_per_guild() -> Result<(), AppError> {
    let test = TestBuilder::new().with_invite_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = InviteRepository::new(db);
    repo.record_referral(1, 100, 7, Utc::now()).await?;
    repo.record_referral(2, 101, 7, Utc::now()).await?;
    repo.record_referral(2, 102, 7, Utc::now()).await?;

    assert_eq!(repo.invite_count(1, 7).await?, 1);
    assert_eq!(repo.invite_count(2, 7).await?, 2);

    Ok(())
}
