use super::*;

/// Tests buying an item the member can afford.
///
/// Expected: Ok(Purchased) with points debited and the purchase counted
#[tokio::test]
async fn debits_and_records_purchase() -> Result<(), AppError> {
    let test = TestBuilder::new().with_shop_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_balance(db, 42, 150).await?;
    let item = ShopItem::from_entity(factory::create_item(db, 100).await?)?;

    let repo = ShopRepository::new(db);
    let outcome = repo.purchase(42, &item).await?;

    assert_eq!(
        outcome,
        PurchaseOutcome::Purchased {
            item: item.clone(),
            remaining: 50
        }
    );
    assert_eq!(PointsRepository::new(db).balance(42).await?, 50);

    let purchases = repo.purchases_for_user(42).await?;
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0].item_key, item.key);
    assert_eq!(purchases[0].count, 1);

    Ok(())
}

/// Tests buying an item the member cannot afford.
///
/// Expected: Ok(InsufficientPoints) with nothing debited or recorded
#[tokio::test]
async fn refuses_when_short_of_points() -> Result<(), AppError> {
    let test = TestBuilder::new().with_shop_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_balance(db, 42, 40).await?;
    let item = ShopItem::from_entity(factory::create_item(db, 100).await?)?;

    let repo = ShopRepository::new(db);
    let outcome = repo.purchase(42, &item).await?;

    assert_eq!(outcome, PurchaseOutcome::InsufficientPoints { missing: 60 });
    assert_eq!(PointsRepository::new(db).balance(42).await?, 40);
    assert!(repo.purchases_for_user(42).await?.is_empty());

    Ok(())
}

/// Tests the per-member purchase limit.
///
/// Expected: Ok(LimitReached) on the purchase past the limit, balance untouched
#[tokio::test]
async fn enforces_per_member_limit() -> Result<(), AppError> {
    let test = TestBuilder::new().with_shop_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_balance(db, 42, 1000).await?;
    let item = ShopItem::from_entity(
        factory::shop_item::ShopItemFactory::new(db)
            .cost(100)
            .max_per_user(Some(2))
            .build()
            .await?,
    )?;

    let repo = ShopRepository::new(db);
    repo.purchase(42, &item).await?;
    repo.purchase(42, &item).await?;
    let outcome = repo.purchase(42, &item).await?;

    assert_eq!(outcome, PurchaseOutcome::LimitReached { max: 2 });
    assert_eq!(PointsRepository::new(db).balance(42).await?, 800);
    assert_eq!(repo.purchases_for_user(42).await?[0].count, 2);

    Ok(())
}
