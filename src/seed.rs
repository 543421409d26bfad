//! Demo catalog and bootstrap admin account.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};

use crate::entities::{prelude::*, users};
use crate::errors::ServiceResult;
use crate::models::catalog::{CreateProductRequest, RetailerInput};
use crate::services::{account, catalog};

pub const ADMIN_EMAIL: &str = "admin@royalbee.com";

struct SeedProduct {
    name: &'static str,
    category: &'static str,
    image: &'static str,
    description: &'static str,
    /// (retailer, price, rating, delivery)
    offers: [(&'static str, Decimal, f64, &'static str); 4],
}

const SAME_DAY: &str = "Same day delivery";
const NEXT_DAY: &str = "Next day delivery";
const TWO_THREE_DAYS: &str = "2-3 day delivery";

fn catalog_data() -> Vec<SeedProduct> {
    vec![
        SeedProduct {
            name: "Organic Bananas (6 pack)",
            category: "Fresh Produce",
            image: "https://images.pexels.com/photos/2872755/pexels-photo-2872755.jpeg?auto=compress&cs=tinysrgb&w=400",
            description: "Fresh organic bananas, perfect for snacking or baking",
            offers: [
                ("Royal Bee", dec!(1.20), 4.5, SAME_DAY),
                ("Tesco", dec!(1.30), 4.3, NEXT_DAY),
                ("Sainsbury's", dec!(1.25), 4.2, NEXT_DAY),
                ("Morrisons", dec!(1.35), 4.1, TWO_THREE_DAYS),
            ],
        },
        SeedProduct {
            name: "Whole Milk (2L)",
            category: "Dairy",
            image: "https://images.pexels.com/photos/236010/pexels-photo-236010.jpeg?auto=compress&cs=tinysrgb&w=400",
            description: "Fresh whole milk, rich in calcium and protein",
            offers: [
                ("Royal Bee", dec!(1.35), 4.6, SAME_DAY),
                ("Tesco", dec!(1.40), 4.4, NEXT_DAY),
                ("Sainsbury's", dec!(1.45), 4.3, NEXT_DAY),
                ("Morrisons", dec!(1.38), 4.2, TWO_THREE_DAYS),
            ],
        },
        SeedProduct {
            name: "Sourdough Bread",
            category: "Bakery",
            image: "https://images.pexels.com/photos/1775043/pexels-photo-1775043.jpeg?auto=compress&cs=tinysrgb&w=400",
            description: "Artisan sourdough bread, freshly baked daily",
            offers: [
                ("Royal Bee", dec!(1.80), 4.7, SAME_DAY),
                ("Tesco", dec!(1.95), 4.5, NEXT_DAY),
                ("Sainsbury's", dec!(1.85), 4.4, NEXT_DAY),
                ("Morrisons", dec!(1.90), 4.3, TWO_THREE_DAYS),
            ],
        },
        SeedProduct {
            name: "Free-Range Eggs (12 pack)",
            category: "Fresh Produce",
            image: "https://images.pexels.com/photos/162712/egg-white-food-protein-162712.jpeg?auto=compress&cs=tinysrgb&w=400",
            description: "Fresh free-range eggs from happy hens",
            offers: [
                ("Royal Bee", dec!(2.20), 4.8, SAME_DAY),
                ("Tesco", dec!(2.30), 4.6, NEXT_DAY),
                ("Sainsbury's", dec!(2.25), 4.5, NEXT_DAY),
                ("Morrisons", dec!(2.35), 4.4, TWO_THREE_DAYS),
            ],
        },
        SeedProduct {
            name: "Pasta - Penne (500g)",
            category: "Pantry",
            image: "https://images.pexels.com/photos/1437267/pexels-photo-1437267.jpeg?auto=compress&cs=tinysrgb&w=400",
            description: "Premium durum wheat pasta, perfect for family meals",
            offers: [
                ("Royal Bee", dec!(0.85), 4.4, SAME_DAY),
                ("Tesco", dec!(0.90), 4.3, NEXT_DAY),
                ("Sainsbury's", dec!(0.88), 4.2, NEXT_DAY),
                ("Morrisons", dec!(0.92), 4.1, TWO_THREE_DAYS),
            ],
        },
        SeedProduct {
            name: "Chicken Breast (500g)",
            category: "Meat",
            image: "https://images.pexels.com/photos/3688/food-dinner-lunch-chicken.jpg?auto=compress&cs=tinysrgb&w=400",
            description: "Fresh chicken breast, high in protein",
            offers: [
                ("Royal Bee", dec!(3.50), 4.6, SAME_DAY),
                ("Tesco", dec!(3.65), 4.5, NEXT_DAY),
                ("Sainsbury's", dec!(3.55), 4.4, NEXT_DAY),
                ("Morrisons", dec!(3.70), 4.3, TWO_THREE_DAYS),
            ],
        },
    ]
}

fn retailer_logo(name: &str) -> Option<String> {
    let logo = match name {
        "Royal Bee" => "🐝",
        "Tesco" => "🏪",
        "Sainsbury's" => "🛍️",
        "Morrisons" => "🏬",
        _ => return None,
    };
    Some(logo.to_string())
}

fn retailer_description(name: &str) -> Option<String> {
    let text = match name {
        "Royal Bee" => "Your local supermarket with unbeatable prices",
        "Tesco" => "Every little helps - quality products at great prices",
        "Sainsbury's" => "Quality ingredients, carefully sourced",
        "Morrisons" => "Fresh food specialists with local sourcing",
        _ => return None,
    };
    Some(text.to_string())
}

/// Replaces the whole catalog with the demo products. Returns how many
/// products were inserted.
pub async fn seed_catalog(db: &DatabaseConnection) -> ServiceResult<usize> {
    let txn = db.begin().await?;
    CartItems::delete_many().exec(&txn).await?;
    Retailers::delete_many().exec(&txn).await?;
    Products::delete_many().exec(&txn).await?;
    txn.commit().await?;

    let data = catalog_data();
    for product in &data {
        let req = CreateProductRequest {
            name: product.name.to_string(),
            category: product.category.to_string(),
            image: Some(product.image.to_string()),
            description: Some(product.description.to_string()),
            price: None,
            retailers: product
                .offers
                .iter()
                .map(|(name, price, rating, delivery)| RetailerInput {
                    name: name.to_string(),
                    logo: retailer_logo(name),
                    description: retailer_description(name),
                    rating: Some(*rating),
                    delivery_options: Some(delivery.to_string()),
                    price: *price,
                })
                .collect(),
        };
        catalog::create_product(db, &req).await?;
    }

    Ok(data.len())
}

/// Creates the admin account unless one with that email already exists.
/// Returns true when a row was inserted.
pub async fn ensure_admin(db: &DatabaseConnection, password: &str) -> ServiceResult<bool> {
    if account::find_by_email(db, ADMIN_EMAIL).await?.is_some() {
        return Ok(false);
    }

    users::ActiveModel {
        email: Set(ADMIN_EMAIL.to_string()),
        hashed_password: Set(account::hash_password(password)?),
        name: Set("Admin".to_string()),
        points: Set(0),
        role: Set(Some(users::ADMIN_ROLE.to_string())),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(true)
}
