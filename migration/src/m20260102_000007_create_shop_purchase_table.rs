use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShopPurchase::Table)
                    .if_not_exists()
                    .col(pk_auto(ShopPurchase::Id))
                    .col(string(ShopPurchase::UserId))
                    .col(string(ShopPurchase::ItemKey))
                    .col(integer(ShopPurchase::Count).default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_shop_purchase_user_item")
                    .table(ShopPurchase::Table)
                    .col(ShopPurchase::UserId)
                    .col(ShopPurchase::ItemKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_shop_purchase_user_item")
                    .table(ShopPurchase::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ShopPurchase::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ShopPurchase {
    Table,
    Id,
    UserId,
    ItemKey,
    Count,
}
