use super::*;

fn param(key: &str, cost: i64, max_per_user: Option<u32>) -> UpsertShopItemParam {
    UpsertShopItemParam {
        key: key.to_string(),
        name: "Color Role".to_string(),
        cost,
        role_id: Some(555),
        description: "A shiny role".to_string(),
        max_per_user,
    }
}

/// Tests creating an item.
///
/// Expected: Ok with the item stored as given
#[tokio::test]
async fn creates_item() -> Result<(), AppError> {
    let test = TestBuilder::new().with_shop_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ShopRepository::new(db);
    let item = repo.upsert(param("color", 300, Some(1))).await?;

    assert_eq!(item.key, "color");
    assert_eq!(item.role_id, Some(555));
    assert_eq!(item.max_per_user, Some(1));
    assert_eq!(repo.get("color").await?, Some(item));

    Ok(())
}

/// Tests replacing an item, including making it unlimited.
///
/// Expected: Ok with the new values and an unlimited purchase limit
#[tokio::test]
async fn replaces_item() -> Result<(), AppError> {
    let test = TestBuilder::new().with_shop_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ShopRepository::new(db);
    repo.upsert(param("color", 300, Some(1))).await?;
    let item = repo.upsert(param("color", 450, None)).await?;

    assert_eq!(item.cost, 450);
    assert_eq!(item.max_per_user, None);
    assert_eq!(repo.list().await?.len(), 1);

    Ok(())
}
