use super::*;

/// Tests crediting a member who has no balance yet.
///
/// Expected: Ok with a new balance equal to the credit
#[tokio::test]
async fn creates_balance_on_first_credit() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PointBalance)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PointsRepository::new(db);
    let total = repo.add(42, 15).await?;

    assert_eq!(total, 15);
    assert_eq!(repo.balance(42).await?, 15);

    Ok(())
}

/// Tests that credits accumulate on an existing balance.
///
/// Expected: Ok with the sum of the stored balance and the credit
#[tokio::test]
async fn adds_to_existing_balance() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PointBalance)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_balance(db, 42, 100).await?;

    let repo = PointsRepository::new(db);
    repo.add(42, 20).await?;
    let total = repo.add(42, 5).await?;

    assert_eq!(total, 125);
    assert_eq!(repo.balance(42).await?, 125);

    Ok(())
}

/// Tests removing more points than the member has.
///
/// Expected: Ok with the balance clamped at zero
#[tokio::test]
async fn clamps_at_zero() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PointBalance)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_balance(db, 42, 10).await?;

    let repo = PointsRepository::new(db);
    let total = repo.add(42, -50).await?;

    assert_eq!(total, 0);
    assert_eq!(repo.balance(42).await?, 0);

    Ok(())
}

/// Tests that balances of different members are independent.
///
/// Expected: Ok with only the credited member's balance changed
#[tokio::test]
async fn does_not_touch_other_members() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PointBalance)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_balance(db, 7, 70).await?;

    let repo = PointsRepository::new(db);
    repo.add(42, 5).await?;

    assert_eq!(repo.balance(7).await?, 70);
    assert_eq!(repo.balance(42).await?, 5);

    Ok(())
}
