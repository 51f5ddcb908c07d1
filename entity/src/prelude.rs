pub use super::daily_claim::Entity as DailyClaim;
pub use super::invite_referral::Entity as InviteReferral;
pub use super::invite_reward::Entity as InviteReward;
pub use super::member_tier::Entity as MemberTier;
pub use super::point_balance::Entity as PointBalance;
pub use super::shop_item::Entity as ShopItem;
pub use super::shop_purchase::Entity as ShopPurchase;
