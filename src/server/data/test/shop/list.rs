use super::*;

/// Tests listing and removing items.
///
/// Expected: Ok with items cheapest first, and a removed item gone from the list
#[tokio::test]
async fn lists_cheapest_first() -> Result<(), AppError> {
    let test = TestBuilder::new().with_shop_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::shop_item::ShopItemFactory::new(db)
        .key("b")
        .cost(300)
        .build()
        .await?;
    factory::shop_item::ShopItemFactory::new(db)
        .key("a")
        .cost(50)
        .build()
        .await?;
    factory::shop_item::ShopItemFactory::new(db)
        .key("c")
        .cost(300)
        .build()
        .await?;

    let repo = ShopRepository::new(db);
    let keys: Vec<String> = repo.list().await?.into_iter().map(|i| i.key).collect();
    assert_eq!(keys, vec!["a", "b", "c"]);

    assert!(repo.remove("b").await?);
    assert!(!repo.remove("b").await?);
    let keys: Vec<String> = repo.list().await?.into_iter().map(|i| i.key).collect();
    assert_eq!(keys, vec!["a", "c"]);

    Ok(())
}
