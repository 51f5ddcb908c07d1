//! SeaORM entity models for the relational stores backing the bot.
//!
//! The quest progress tree lives in its own JSON document; these tables hold the
//! collaborator state around it (points, daily claims, invites, tiers and the shop).

pub mod prelude;

pub mod daily_claim;
pub mod invite_referral;
pub mod invite_reward;
pub mod member_tier;
pub mod point_balance;
pub mod shop_item;
pub mod shop_purchase;
