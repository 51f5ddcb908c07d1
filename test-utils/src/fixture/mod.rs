//! Test fixtures providing reusable test data without database insertion.
//!
//! Fixtures build entity models in memory. Use them to test `from_entity` conversions
//! and as default values for factories.

pub mod member_tier;
pub mod shop_item;
