//! Shop data repository.
//!
//! This module provides the `ShopRepository` for shop items and per-member purchase
//! counts. A purchase debits the buyer's point balance and bumps their purchase count in
//! the same transaction, so a failed purchase never costs points and a paid one is never
//! lost.

use migration::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::{
    data::points::{current_points, write_points},
    model::shop::{PurchaseOutcome, ShopItem, ShopPurchase, UpsertShopItemParam},
};

/// Repository providing database operations for the shop.
pub struct ShopRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ShopRepository<'a> {
    /// Creates a new ShopRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `ShopRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets every item, cheapest first.
    pub async fn list(&self) -> Result<Vec<ShopItem>, DbErr> {
        let entities = entity::prelude::ShopItem::find()
            .order_by_asc(entity::shop_item::Column::Cost)
            .order_by_asc(entity::shop_item::Column::Key)
            .all(self.db)
            .await?;

        entities.into_iter().map(ShopItem::from_entity).collect()
    }

    /// Gets an item by key.
    ///
    /// # Returns
    /// - `Ok(Some(ShopItem))` - Item exists
    /// - `Ok(None)` - No item with that key
    /// - `Err(DbErr)` - Database error during query
    pub async fn get(&self, key: &str) -> Result<Option<ShopItem>, DbErr> {
        let entity = entity::prelude::ShopItem::find_by_id(key.to_string())
            .one(self.db)
            .await?;

        entity.map(ShopItem::from_entity).transpose()
    }

    /// Creates or replaces an item.
    ///
    /// # Arguments
    /// - `param` - Full item definition; `max_per_user: None` means unlimited
    ///
    /// # Returns
    /// - `Ok(ShopItem)` - The stored item
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn upsert(&self, param: UpsertShopItemParam) -> Result<ShopItem, DbErr> {
        let max_per_user = param
            .max_per_user
            .map(|max| i32::try_from(max).unwrap_or(i32::MAX))
            .unwrap_or(-1);

        let entity = entity::prelude::ShopItem::insert(entity::shop_item::ActiveModel {
            key: ActiveValue::Set(param.key),
            name: ActiveValue::Set(param.name),
            cost: ActiveValue::Set(param.cost),
            role_id: ActiveValue::Set(param.role_id.map(|id| id.to_string())),
            description: ActiveValue::Set(param.description),
            max_per_user: ActiveValue::Set(max_per_user),
        })
        .on_conflict(
            OnConflict::column(entity::shop_item::Column::Key)
                .update_columns([
                    entity::shop_item::Column::Name,
                    entity::shop_item::Column::Cost,
                    entity::shop_item::Column::RoleId,
                    entity::shop_item::Column::Description,
                    entity::shop_item::Column::MaxPerUser,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        ShopItem::from_entity(entity)
    }

    /// Deletes an item. Purchase counts already recorded are kept.
    ///
    /// # Returns
    /// - `Ok(true)` - Item deleted
    /// - `Ok(false)` - No item with that key
    /// - `Err(DbErr)` - Database error during delete
    pub async fn remove(&self, key: &str) -> Result<bool, DbErr> {
        let result = entity::prelude::ShopItem::delete_by_id(key.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets everything a member has bought.
    pub async fn purchases_for_user(&self, user_id: u64) -> Result<Vec<ShopPurchase>, DbErr> {
        let entities = entity::prelude::ShopPurchase::find()
            .filter(entity::shop_purchase::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(entity::shop_purchase::Column::ItemKey)
            .all(self.db)
            .await?;

        entities.into_iter().map(ShopPurchase::from_entity).collect()
    }

    /// Buys one unit of `item` for a member.
    ///
    /// Checks the per-member limit, then the balance, then debits and records the
    /// purchase, all in one transaction.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the buyer
    /// - `item` - Item being bought
    ///
    /// # Returns
    /// - `Ok(PurchaseOutcome::Purchased)` - Points debited, purchase recorded
    /// - `Ok(PurchaseOutcome::LimitReached)` - Member already owns the maximum
    /// - `Ok(PurchaseOutcome::InsufficientPoints)` - Balance too low
    /// - `Err(DbErr)` - Database error; nothing was changed
    pub async fn purchase(&self, user_id: u64, item: &ShopItem) -> Result<PurchaseOutcome, DbErr> {
        let txn = self.db.begin().await?;

        let existing = find_purchase(&txn, user_id, &item.key).await?;
        let owned = existing.as_ref().map(|p| p.count).unwrap_or(0);

        if let Some(max) = item.max_per_user {
            if i64::from(owned) >= i64::from(max) {
                txn.rollback().await?;
                return Ok(PurchaseOutcome::LimitReached { max });
            }
        }

        let balance = current_points(&txn, user_id).await?;
        if balance < item.cost {
            txn.rollback().await?;
            return Ok(PurchaseOutcome::InsufficientPoints {
                missing: item.cost - balance,
            });
        }

        let remaining = balance - item.cost;
        write_points(&txn, user_id, remaining).await?;

        match existing {
            Some(purchase) => {
                let count = purchase.count.saturating_add(1);
                let mut active: entity::shop_purchase::ActiveModel = purchase.into();
                active.count = ActiveValue::Set(count);
                active.update(&txn).await?;
            }
            None => {
                entity::shop_purchase::ActiveModel {
                    id: ActiveValue::NotSet,
                    user_id: ActiveValue::Set(user_id.to_string()),
                    item_key: ActiveValue::Set(item.key.clone()),
                    count: ActiveValue::Set(1),
                }
                .insert(&txn)
                .await?;
            }
        }

        txn.commit().await?;

        Ok(PurchaseOutcome::Purchased {
            item: item.clone(),
            remaining,
        })
    }
}

async fn find_purchase<C: ConnectionTrait>(
    conn: &C,
    user_id: u64,
    item_key: &str,
) -> Result<Option<entity::shop_purchase::Model>, DbErr> {
    entity::prelude::ShopPurchase::find()
        .filter(entity::shop_purchase::Column::UserId.eq(user_id.to_string()))
        .filter(entity::shop_purchase::Column::ItemKey.eq(item_key))
        .one(conn)
        .await
}
