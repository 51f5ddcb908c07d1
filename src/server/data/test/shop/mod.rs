use crate::server::{
    data::{points::PointsRepository, shop::ShopRepository},
    error::AppError,
    model::shop::{PurchaseOutcome, ShopItem, UpsertShopItemParam},
};
use test_utils::{builder::TestBuilder, factory};

mod list;
mod purchase;
mod upsert;
