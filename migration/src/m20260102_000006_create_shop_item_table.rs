use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShopItem::Table)
                    .if_not_exists()
                    .col(string(ShopItem::Key).primary_key())
                    .col(string(ShopItem::Name))
                    .col(big_integer(ShopItem::Cost))
                    .col(string_null(ShopItem::RoleId))
                    .col(string(ShopItem::Description).default(""))
                    .col(integer(ShopItem::MaxPerUser).default(-1))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ShopItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ShopItem {
    Table,
    Key,
    Name,
    Cost,
    RoleId,
    Description,
    MaxPerUser,
}
