use sea_orm_migration::prelude::*;

use super::m20250715_000002_create_products::Products;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Offer rows; deleting a product must remove these first (no cascade)
        manager
            .create_table(
                Table::create()
                    .table(Retailers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Retailers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Retailers::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Retailers::Logo).string().null())
                    .col(ColumnDef::new(Retailers::Description).text().null())
                    .col(ColumnDef::new(Retailers::Rating).double().null())
                    .col(ColumnDef::new(Retailers::DeliveryOptions).string().null())
                    .col(ColumnDef::new(Retailers::ProductId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_retailers_product_id")
                            .from(Retailers::Table, Retailers::ProductId)
                            .to(Products::Table, Products::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_retailers_product_id")
                    .table(Retailers::Table)
                    .col(Retailers::ProductId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Retailers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Retailers {
    Table,
    Id,
    Name,
    Logo,
    Description,
    Rating,
    DeliveryOptions,
    ProductId,
}
