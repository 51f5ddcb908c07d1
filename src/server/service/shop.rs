use sea_orm::DatabaseConnection;

use crate::server::{
    data::shop::ShopRepository,
    error::AppError,
    model::shop::{PurchaseOutcome, ShopItem, ShopPurchase, UpsertShopItemParam},
};

/// Point shop. Granting an item's role is left to the caller.
pub struct ShopService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ShopService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_items(&self) -> Result<Vec<ShopItem>, AppError> {
        Ok(ShopRepository::new(self.db).list().await?)
    }

    /// Creates or replaces an item after validating it
    pub async fn upsert_item(&self, param: UpsertShopItemParam) -> Result<ShopItem, AppError> {
        if param.key.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Shop item key must not be empty".to_string(),
            ));
        }
        if param.cost < 0 {
            return Err(AppError::BadRequest(format!(
                "Shop item {} cannot have a negative cost",
                param.key
            )));
        }

        let item = ShopRepository::new(self.db).upsert(param).await?;

        tracing::info!("Saved shop item {} ({} points)", item.key, item.cost);

        Ok(item)
    }

    pub async fn remove_item(&self, key: &str) -> Result<bool, AppError> {
        Ok(ShopRepository::new(self.db).remove(key).await?)
    }

    pub async fn purchases_for_user(&self, user_id: u64) -> Result<Vec<ShopPurchase>, AppError> {
        Ok(ShopRepository::new(self.db)
            .purchases_for_user(user_id)
            .await?)
    }

    /// Buys one unit of an item.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the buyer
    /// - `key` - Key of the item
    ///
    /// # Returns
    /// - `Ok(PurchaseOutcome)` - Purchased, or refused for limit or balance
    /// - `Err(AppError::NotFound)` - No item with that key
    /// - `Err(AppError::DbErr)` - Database error; no points were taken
    pub async fn purchase(&self, user_id: u64, key: &str) -> Result<PurchaseOutcome, AppError> {
        let repo = ShopRepository::new(self.db);

        let item = repo
            .get(key)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Shop item {} not found", key)))?;

        let outcome = repo.purchase(user_id, &item).await?;

        if let PurchaseOutcome::Purchased { remaining, .. } = &outcome {
            tracing::info!(
                "User {} bought {} for {} points, {} left",
                user_id,
                item.key,
                item.cost,
                remaining
            );
        }

        Ok(outcome)
    }
}
