pub use sea_orm_migration::prelude::*;

mod m20250715_000001_create_users;
mod m20250715_000002_create_products;
mod m20250715_000003_create_retailers;
mod m20250715_000004_create_cart_items;
mod m20250715_000005_create_orders;
mod m20250715_000006_create_order_items;
mod m20250722_000001_add_price_fields;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250715_000001_create_users::Migration),
            Box::new(m20250715_000002_create_products::Migration),
            Box::new(m20250715_000003_create_retailers::Migration),
            Box::new(m20250715_000004_create_cart_items::Migration),
            Box::new(m20250715_000005_create_orders::Migration),
            Box::new(m20250715_000006_create_order_items::Migration),
            Box::new(m20250722_000001_add_price_fields::Migration),
        ]
    }
}
