//! Domain models for the points shop.

use sea_orm::DbErr;

/// An item members can buy with points.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopItem {
    pub key: String,
    pub name: String,
    pub cost: i64,
    /// Role granted on purchase; granting it is up to the caller.
    pub role_id: Option<u64>,
    pub description: String,
    /// Per-member purchase limit; `None` means unlimited.
    pub max_per_user: Option<u32>,
}

impl ShopItem {
    /// Converts an entity model to a shop item at the repository boundary.
    ///
    /// A negative `max_per_user` in the table means unlimited.
    ///
    /// # Arguments
    /// - `entity` - The database entity model to convert
    ///
    /// # Returns
    /// - `Ok(ShopItem)` - Successfully converted model
    /// - `Err(DbErr::Custom)` - Stored role_id is not a valid u64
    pub fn from_entity(entity: entity::shop_item::Model) -> Result<Self, DbErr> {
        let role_id = entity
            .role_id
            .map(|id| {
                id.parse::<u64>()
                    .map_err(|e| DbErr::Custom(format!("Failed to parse role_id: {}", e)))
            })
            .transpose()?;

        Ok(Self {
            key: entity.key,
            name: entity.name,
            cost: entity.cost,
            role_id,
            description: entity.description,
            max_per_user: u32::try_from(entity.max_per_user).ok(),
        })
    }
}

/// Parameters for creating or replacing a shop item.
#[derive(Debug, Clone)]
pub struct UpsertShopItemParam {
    pub key: String,
    pub name: String,
    pub cost: i64,
    pub role_id: Option<u64>,
    pub description: String,
    pub max_per_user: Option<u32>,
}

/// How many of an item a member owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopPurchase {
    pub user_id: u64,
    pub item_key: String,
    pub count: u32,
}

impl ShopPurchase {
    pub fn from_entity(entity: entity::shop_purchase::Model) -> Result<Self, DbErr> {
        let user_id = entity
            .user_id
            .parse::<u64>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse user_id: {}", e)))?;

        Ok(Self {
            user_id,
            item_key: entity.item_key,
            count: u32::try_from(entity.count).unwrap_or(0),
        })
    }
}

/// Result of a purchase attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum PurchaseOutcome {
    /// Points were debited; `remaining` is the new balance.
    Purchased { item: ShopItem, remaining: i64 },
    /// The member already owns the maximum allowed.
    LimitReached { max: u32 },
    /// The balance is short by `missing` points.
    InsufficientPoints { missing: i64 },
}
