use super::*;

/// Tests ranking inviters in a guild.
///
/// Expected: Ok with inviters by descending count, ties by ID, other guilds ignored
#[tokio::test]
async fn ranks_inviters() -> Result<(), AppError> {
    let test = TestBuilder::new().with_invite_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_referral(db, 1, 100, 9).await?;
    factory::create_referral(db, 1, 101, 8).await?;
    factory::create_referral(db, 1, 102, 8).await?;
    factory::create_referral(db, 1, 103, 7).await?;
    factory::create_referral(db, 2, 104, 7).await?;
    factory::create_referral(db, 2, 105, 7).await?;

    let repo = InviteRepository::new(db);
    let top = repo.top_inviters(1, 2).await?;

    assert_eq!(
        top,
        vec![
            InviterCount {
                inviter_id: 8,
                count: 2
            },
            InviterCount {
                inviter_id: 7,
                count: 1
            },
        ]
    );

    Ok(())
}
