mod common;

use royalbee_backend::entities::prelude::*;
use royalbee_backend::errors::ServiceError;
use royalbee_backend::models::cart::AddToCartRequest;
use royalbee_backend::models::catalog::{
    CreateProductRequest, ProductsQuery, RetailerInput, UpdateProductRequest,
};
use royalbee_backend::seed;
use royalbee_backend::services::{cart, catalog};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{EntityTrait, PaginatorTrait};

use crate::common::{create_user, setup_test_db};

fn offer(name: &str, price: Decimal) -> RetailerInput {
    RetailerInput {
        name: name.to_string(),
        logo: None,
        description: None,
        rating: Some(4.0),
        delivery_options: Some("Next day delivery".to_string()),
        price,
    }
}

fn product(name: &str, offers: Vec<RetailerInput>) -> CreateProductRequest {
    CreateProductRequest {
        name: name.to_string(),
        category: "Pantry".to_string(),
        image: None,
        description: None,
        price: None,
        retailers: offers,
    }
}

#[tokio::test]
async fn seeded_catalog_lists_offers_cheapest_first() {
    let db = setup_test_db().await.unwrap();
    assert_eq!(seed::seed_catalog(&db).await.unwrap(), 6);

    let products = catalog::list_products(&db, &ProductsQuery::default())
        .await
        .unwrap();
    assert_eq!(products.len(), 6);

    let bananas = &products[0];
    assert_eq!(bananas.name, "Organic Bananas (6 pack)");
    assert_eq!(bananas.price, Some(dec!(1.20)));
    let names: Vec<&str> = bananas.retailers.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Royal Bee", "Sainsbury's", "Tesco", "Morrisons"]);

    let best = catalog::best_offer(&db, bananas.id).await.unwrap();
    assert_eq!(best.name, "Royal Bee");
    assert_eq!(best.price, Some(dec!(1.20)));
}

#[tokio::test]
async fn reseeding_replaces_the_catalog() {
    let db = setup_test_db().await.unwrap();
    seed::seed_catalog(&db).await.unwrap();
    seed::seed_catalog(&db).await.unwrap();

    assert_eq!(Products::find().count(&db).await.unwrap(), 6);
    assert_eq!(Retailers::find().count(&db).await.unwrap(), 24);
}

#[tokio::test]
async fn listing_pages_with_clamped_limit() {
    let db = setup_test_db().await.unwrap();
    seed::seed_catalog(&db).await.unwrap();

    let page = catalog::list_products(
        &db,
        &ProductsQuery {
            skip: Some(2),
            limit: Some(3),
        },
    )
    .await
    .unwrap();
    let names: Vec<&str> = page.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Sourdough Bread", "Free-Range Eggs (12 pack)", "Pasta - Penne (500g)"]
    );

    let at_least_one = catalog::list_products(
        &db,
        &ProductsQuery {
            skip: None,
            limit: Some(0),
        },
    )
    .await
    .unwrap();
    assert_eq!(at_least_one.len(), 1);
}

#[tokio::test]
async fn missing_product_is_not_found() {
    let db = setup_test_db().await.unwrap();

    let err = catalog::get_product(&db, 42).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let err = catalog::best_offer(&db, 42).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn offer_changes_refresh_cached_best_price() {
    let db = setup_test_db().await.unwrap();
    let created = catalog::create_product(
        &db,
        &product("Oats", vec![offer("Tesco", dec!(2.00)), offer("Morrisons", dec!(2.10))]),
    )
    .await
    .unwrap();
    assert_eq!(created.price, Some(dec!(2.00)));

    let cheaper = catalog::add_retailer(&db, created.id, &offer("Royal Bee", dec!(1.75)))
        .await
        .unwrap();
    assert_eq!(
        catalog::get_product(&db, created.id).await.unwrap().price,
        Some(dec!(1.75))
    );

    catalog::delete_retailer(&db, cheaper.id).await.unwrap();
    let after = catalog::get_product(&db, created.id).await.unwrap();
    assert_eq!(after.price, Some(dec!(2.00)));
    assert_eq!(after.retailers.len(), 2);

    for r in after.retailers {
        catalog::delete_retailer(&db, r.id).await.unwrap();
    }
    assert_eq!(catalog::get_product(&db, created.id).await.unwrap().price, None);
}

#[tokio::test]
async fn invalid_offers_are_rejected() {
    let db = setup_test_db().await.unwrap();

    let err = catalog::create_product(&db, &product("Rice", vec![offer("Tesco", dec!(-1))]))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let mut bad_rating = offer("Tesco", dec!(1));
    bad_rating.rating = Some(7.5);
    let err = catalog::create_product(&db, &product("Rice", vec![bad_rating]))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    assert_eq!(Products::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn update_changes_only_given_fields() {
    let db = setup_test_db().await.unwrap();
    let created = catalog::create_product(&db, &product("Jam", vec![offer("Tesco", dec!(1.10))]))
        .await
        .unwrap();

    let updated = catalog::update_product(
        &db,
        created.id,
        &UpdateProductRequest {
            name: None,
            category: Some("Breakfast".to_string()),
            image: None,
            description: Some("Strawberry".to_string()),
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.name, "Jam");
    assert_eq!(updated.category, "Breakfast");
    assert_eq!(updated.description.as_deref(), Some("Strawberry"));
    assert_eq!(updated.retailers.len(), 1);
}

#[tokio::test]
async fn deleting_product_removes_offers_and_cart_lines() {
    let db = setup_test_db().await.unwrap();
    let user = create_user(&db, "cart@example.com", "pw", None).await;
    let created = catalog::create_product(
        &db,
        &product("Tea", vec![offer("Tesco", dec!(3.00)), offer("Royal Bee", dec!(2.80))]),
    )
    .await
    .unwrap();
    let kept = catalog::create_product(&db, &product("Coffee", vec![offer("Tesco", dec!(4.00))]))
        .await
        .unwrap();

    cart::add_to_cart(
        &db,
        user.id,
        &AddToCartRequest {
            product_id: created.id,
            retailer_id: created.retailers[0].id,
            quantity: 2,
        },
    )
    .await
    .unwrap();

    catalog::delete_product(&db, created.id).await.unwrap();

    assert_eq!(Products::find().count(&db).await.unwrap(), 1);
    assert_eq!(Retailers::find().count(&db).await.unwrap(), 1);
    assert!(cart::list_cart(&db, user.id).await.unwrap().is_empty());
    assert!(catalog::get_product(&db, kept.id).await.is_ok());

    let err = catalog::delete_product(&db, created.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn cart_snapshots_price_and_merges_lines() {
    let db = setup_test_db().await.unwrap();
    let user = create_user(&db, "merge@example.com", "pw", None).await;
    let other = create_user(&db, "nosy@example.com", "pw", None).await;
    let created = catalog::create_product(&db, &product("Honey", vec![offer("Royal Bee", dec!(4.50))]))
        .await
        .unwrap();
    let retailer_id = created.retailers[0].id;

    let request = AddToCartRequest {
        product_id: created.id,
        retailer_id,
        quantity: 1,
    };
    let first = cart::add_to_cart(&db, user.id, &request).await.unwrap();
    let second = cart::add_to_cart(&db, user.id, &AddToCartRequest { quantity: 2, ..request.clone() })
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.quantity, 3);
    assert_eq!(second.price, dec!(4.50));
    assert_eq!(cart::list_cart(&db, user.id).await.unwrap().len(), 1);

    // Other users cannot remove the line
    let err = cart::remove_cart_item(&db, other.id, first.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    cart::remove_cart_item(&db, user.id, first.id).await.unwrap();
    assert!(cart::list_cart(&db, user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn cart_rejects_offer_from_another_product() {
    let db = setup_test_db().await.unwrap();
    let user = create_user(&db, "mismatch@example.com", "pw", None).await;
    let a = catalog::create_product(&db, &product("Salt", vec![offer("Tesco", dec!(0.50))]))
        .await
        .unwrap();
    let b = catalog::create_product(&db, &product("Pepper", vec![offer("Tesco", dec!(0.70))]))
        .await
        .unwrap();

    let err = cart::add_to_cart(
        &db,
        user.id,
        &AddToCartRequest {
            product_id: a.id,
            retailer_id: b.retailers[0].id,
            quantity: 1,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    let err = cart::add_to_cart(
        &db,
        user.id,
        &AddToCartRequest {
            product_id: a.id,
            retailer_id: a.retailers[0].id,
            quantity: 0,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}
