pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_point_balance_table;
mod m20260101_000002_create_daily_claim_table;
mod m20260101_000003_create_invite_referral_table;
mod m20260101_000004_create_invite_reward_table;
mod m20260101_000005_create_member_tier_table;
mod m20260102_000006_create_shop_item_table;
mod m20260102_000007_create_shop_purchase_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_point_balance_table::Migration),
            Box::new(m20260101_000002_create_daily_claim_table::Migration),
            Box::new(m20260101_000003_create_invite_referral_table::Migration),
            Box::new(m20260101_000004_create_invite_reward_table::Migration),
            Box::new(m20260101_000005_create_member_tier_table::Migration),
            Box::new(m20260102_000006_create_shop_item_table::Migration),
            Box::new(m20260102_000007_create_shop_purchase_table::Migration),
        ]
    }
}
