use super::*;

/// Tests overwriting a balance.
///
/// Expected: Ok with the stored balance replaced
#[tokio::test]
async fn overwrites_balance() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PointBalance)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_balance(db, 42, 500).await?;

    let repo = PointsRepository::new(db);
    let stored = repo.set(42, 12).await?;

    assert_eq!(stored, 12);
    assert_eq!(repo.balance(42).await?, 12);

    Ok(())
}

/// Tests setting a negative balance.
///
/// Expected: Ok with zero stored
#[tokio::test]
async fn rejects_negative_balance() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::PointBalance)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PointsRepository::new(db);
    let stored = repo.set(42, -3).await?;

    assert_eq!(stored, 0);
    assert_eq!(repo.get(42).await?.map(|b| b.points), Some(0));

    Ok(())
}
