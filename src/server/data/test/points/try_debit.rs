use super::*;

/// Tests debiting a balance that covers the amount.
///
/// Expected: Ok(Debit::Applied) with the reduced balance
#[tokio::test]
async fn debits_when_covered() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PointBalance)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_balance(db, 42, 100).await?;

    let repo = PointsRepository::new(db);
    let result = repo.try_debit(42, 100).await?;

    assert_eq!(result, Debit::Applied(0));
    assert_eq!(repo.balance(42).await?, 0);

    Ok(())
}

/// Tests debiting more than the balance.
///
/// Expected: Ok(Debit::Insufficient) with the shortfall and the balance unchanged
#[tokio::test]
async fn refuses_when_short() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PointBalance)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_balance(db, 42, 30).await?;

    let repo = PointsRepository::new(db);
    let result = repo.try_debit(42, 50).await?;

    assert_eq!(result, Debit::Insufficient { missing: 20 });
    assert_eq!(repo.balance(42).await?, 30);

    Ok(())
}
