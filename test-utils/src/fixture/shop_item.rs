//! Shop item fixtures.

use entity::shop_item;

/// Default test item key.
pub const DEFAULT_KEY: &str = "vip_pass";

/// Default test item cost.
pub const DEFAULT_COST: i64 = 100;

/// Creates a shop item entity model with default values.
///
/// # Default Values
/// - key: `"vip_pass"`
/// - name: `"VIP Pass"`
/// - cost: `100`
/// - role_id: `None`
/// - description: `"Test item"`
/// - max_per_user: `-1` (unlimited)
pub fn entity() -> shop_item::Model {
    shop_item::Model {
        key: DEFAULT_KEY.to_string(),
        name: "VIP Pass".to_string(),
        cost: DEFAULT_COST,
        role_id: None,
        description: "Test item".to_string(),
        max_per_user: -1,
    }
}
