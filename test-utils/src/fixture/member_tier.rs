//! Member tier fixtures.

use chrono::{TimeZone, Utc};
use entity::member_tier;

/// Default test user for tier rows.
pub const DEFAULT_USER_ID: &str = "123456789";

/// Creates a member tier entity model holding `tier` for the default user.
pub fn entity(tier: &str) -> member_tier::Model {
    member_tier::Model {
        user_id: DEFAULT_USER_ID.to_string(),
        tier: tier.to_string(),
        updated_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    }
}
