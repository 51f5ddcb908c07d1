use super::*;

/// Tests a member's first daily claim.
///
/// Expected: Ok(true) with a streak of one stored
#[tokio::test]
async fn creates_streak_row() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DailyClaim)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
    let repo = DailyClaimRepository::new(db);

    assert!(repo.record_first_claim(42, now).await?);

    let streak = repo.get(42).await?.unwrap();
    assert_eq!(streak.streak, 1);
    assert_eq!(streak.best_streak, 1);
    assert_eq!(streak.last_claimed_at, now);

    Ok(())
}

/// Tests a second "first" claim racing the first one.
///
/// Expected: Ok(false) and the stored row unchanged
#[tokio::test]
async fn loses_when_row_exists() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::DailyClaim)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
    let repo = DailyClaimRepository::new(db);
    repo.record_first_claim(42, first).await?;

    let won = repo
        .record_first_claim(42, first + Duration::seconds(1))
        .await?;

    assert!(!won);
    assert_eq!(repo.get(42).await?.unwrap().last_claimed_at, first);

    Ok(())
}
