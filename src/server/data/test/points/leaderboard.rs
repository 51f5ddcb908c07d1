use super::*;

/// Tests leaderboard ordering and limit.
///
/// Expected: Ok with balances by descending points, ties broken by user ID
#[tokio::test]
async fn orders_by_points_then_user() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PointBalance)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_balance(db, 3, 50).await?;
    factory::create_balance(db, 1, 80).await?;
    factory::create_balance(db, 2, 50).await?;
    factory::create_balance(db, 4, 10).await?;

    let repo = PointsRepository::new(db);
    let top = repo.leaderboard(3).await?;

    let ranked: Vec<(u64, i64)> = top.iter().map(|b| (b.user_id, b.points)).collect();
    assert_eq!(ranked, vec![(1, 80), (2, 50), (3, 50)]);

    Ok(())
}
