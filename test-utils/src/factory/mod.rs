//! Factory methods for creating test data.
//!
//! Each table has its own factory module with a `Factory` struct for customization and a
//! `create_*` convenience function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let balance = factory::create_balance(&db, 42, 100).await?;
//! let item = factory::shop_item::ShopItemFactory::new(&db)
//!     .cost(250)
//!     .max_per_user(Some(1))
//!     .build()
//!     .await?;
//! ```

pub mod daily_claim;
pub mod helpers;
pub mod invite_referral;
pub mod member_tier;
pub mod point_balance;
pub mod shop_item;

pub use daily_claim::create_daily_claim;
pub use invite_referral::create_referral;
pub use member_tier::create_member_tier;
pub use point_balance::create_balance;
pub use shop_item::create_item;
