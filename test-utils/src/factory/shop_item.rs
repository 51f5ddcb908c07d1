//! Shop item factory for creating test items.

use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::{factory::helpers::next_id, fixture};

/// Factory for creating shop items with customizable fields.
///
/// Defaults come from `fixture::shop_item`, with the key made unique per factory.
pub struct ShopItemFactory<'a> {
    db: &'a DatabaseConnection,
    model: entity::shop_item::Model,
}

impl<'a> ShopItemFactory<'a> {
    /// Creates a new ShopItemFactory with default values.
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `ShopItemFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let mut model = fixture::shop_item::entity();
        model.key = format!("item_{}", next_id());
        Self { db, model }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.model.key = key.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.model.name = name.into();
        self
    }

    pub fn cost(mut self, cost: i64) -> Self {
        self.model.cost = cost;
        self
    }

    pub fn role_id(mut self, role_id: Option<u64>) -> Self {
        self.model.role_id = role_id.map(|id| id.to_string());
        self
    }

    /// Sets the per-member limit; `None` stores the unlimited marker.
    pub fn max_per_user(mut self, max: Option<i32>) -> Self {
        self.model.max_per_user = max.unwrap_or(-1);
        self
    }

    /// Builds and inserts the item into the database.
    ///
    /// # Returns
    /// - `Ok(entity::shop_item::Model)` - Created item
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::shop_item::Model, DbErr> {
        entity::shop_item::ActiveModel {
            key: ActiveValue::Set(self.model.key),
            name: ActiveValue::Set(self.model.name),
            cost: ActiveValue::Set(self.model.cost),
            role_id: ActiveValue::Set(self.model.role_id),
            description: ActiveValue::Set(self.model.description),
            max_per_user: ActiveValue::Set(self.model.max_per_user),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unlimited item with the given cost.
///
/// Shorthand for `ShopItemFactory::new(db).cost(cost).build().await`.
pub async fn create_item(
    db: &DatabaseConnection,
    cost: i64,
) -> Result<entity::shop_item::Model, DbErr> {
    ShopItemFactory::new(db).cost(cost).build().await
}
