use super::*;

/// Tests a repeat claim against the value that was read.
///
/// Expected: Ok(true) with the new streak stored
#[tokio::test]
async fn updates_when_unchanged() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DailyClaim)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let previous = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
    factory::daily_claim::DailyClaimFactory::new(db)
        .user_id(42)
        .last_claimed_at(previous)
        .streak(3)
        .build()
        .await?;

    let repo = DailyClaimRepository::new(db);
    let now = previous + Duration::hours(25);
    let won = repo.record_claim(42, previous, now, 4, 4).await?;

    assert!(won);
    let stored = repo.get(42).await?.unwrap();
    assert_eq!(stored.streak, 4);
    assert_eq!(stored.best_streak, 4);
    assert_eq!(stored.last_claimed_at, now);

    Ok(())
}

/// Tests a claim whose read went stale because another claim landed first.
///
/// Expected: Ok(false) and the other claim's values kept
#[tokio::test]
async fn refuses_stale_read() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DailyClaim)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let stale = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
    let landed = stale + Duration::hours(26);
    factory::create_daily_claim(db, 42, landed).await?;

    let repo = DailyClaimRepository::new(db);
    let won = repo
        .record_claim(42, stale, landed + Duration::minutes(1), 9, 9)
        .await?;

    assert!(!won);
    let stored = repo.get(42).await?.unwrap();
    assert_eq!(stored.last_claimed_at, landed);
    assert_eq!(stored.streak, 1);

    Ok(())
}
