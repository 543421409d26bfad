mod common;

use chrono::NaiveDate;
use royalbee_backend::models::admin::{AdminOrdersQuery, TopProduct};
use royalbee_backend::seed;
use royalbee_backend::services::{admin, order};
use rust_decimal_macros::dec;

use crate::common::{create_user, item, setup_test_db, submission};

async fn place(db: &sea_orm::DatabaseConnection, user_id: i32, date: &str, total: rust_decimal::Decimal, items: Vec<royalbee_backend::models::order::OrderItemInput>) -> i32 {
    let mut payload = submission(user_id, total, items);
    payload.date = date.to_string();
    order::place_order(db, &payload).await.unwrap().id
}

#[tokio::test]
async fn metrics_on_empty_store_are_zero() {
    let db = setup_test_db().await.unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 7, 23).unwrap();

    let m = admin::metrics(&db, today).await.unwrap();
    assert_eq!(m.revenue, dec!(0));
    assert_eq!(m.total_users, 0);
    assert_eq!(m.orders_today, 0);
    assert_eq!(m.active_users, 0);
    assert_eq!(m.orders_this_week, 0);
    assert_eq!(m.total_products, 0);
    assert_eq!(m.total_stores, 0);
    assert!(m.top_products.is_empty());
}

#[tokio::test]
async fn metrics_aggregate_orders_users_and_catalog() {
    let db = setup_test_db().await.unwrap();
    seed::seed_catalog(&db).await.unwrap();
    let alice = create_user(&db, "alice@example.com", "pw", None).await;
    let bob = create_user(&db, "bob@example.com", "pw", None).await;

    // Wednesday; the week starts on Monday 21st
    let today = NaiveDate::from_ymd_opt(2025, 7, 23).unwrap();

    place(&db, alice.id, "2025-07-23T09:00:00.000Z", dec!(10.50), vec![item("Milk", 3, "Tesco", dec!(3.50))]).await;
    place(&db, alice.id, "2025-07-23T18:30:00.000Z", dec!(20.25), vec![item("Eggs", 1, "Tesco", dec!(20.25))]).await;
    place(&db, bob.id, "2025-07-21T12:00:00.000Z", dec!(5.00), vec![item("Milk", 2, "Royal Bee", dec!(2.50))]).await;
    place(&db, bob.id, "2025-07-15T12:00:00.000Z", dec!(4.00), vec![item("Bread", 4, "Tesco", dec!(1.00))]).await;

    let m = admin::metrics(&db, today).await.unwrap();
    assert_eq!(m.revenue, dec!(39.75));
    assert_eq!(m.total_users, 2);
    assert_eq!(m.orders_today, 2);
    assert_eq!(m.active_users, 1);
    assert_eq!(m.orders_this_week, 3);
    assert_eq!(m.total_products, 6);
    assert_eq!(m.total_stores, 4);

    assert_eq!(
        m.top_products,
        vec![
            TopProduct { name: "Milk".to_string(), quantity: 5 },
            TopProduct { name: "Bread".to_string(), quantity: 4 },
            TopProduct { name: "Eggs".to_string(), quantity: 1 },
        ]
    );
}

#[tokio::test]
async fn top_products_respects_limit() {
    let db = setup_test_db().await.unwrap();
    let user = create_user(&db, "bulk@example.com", "pw", None).await;

    let items = (1..=7)
        .map(|n| item(&format!("Item {}", n), n, "Tesco", dec!(1.00)))
        .collect();
    place(&db, user.id, "2025-07-23T09:00:00.000Z", dec!(28.00), items).await;

    let top = admin::top_products(&db, admin::TOP_PRODUCTS).await.unwrap();
    let names: Vec<&str> = top.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Item 7", "Item 6", "Item 5", "Item 4", "Item 3"]);
}

#[tokio::test]
async fn order_listing_filters_by_date() {
    let db = setup_test_db().await.unwrap();
    let user = create_user(&db, "dates@example.com", "pw", None).await;

    let early = place(&db, user.id, "2025-07-20T23:59:00.000Z", dec!(1.00), vec![item("A", 1, "Tesco", dec!(1.00))]).await;
    let mid = place(&db, user.id, "2025-07-22T08:00:00.000Z", dec!(1.00), vec![item("B", 1, "Tesco", dec!(1.00))]).await;
    let late = place(&db, user.id, "2025-07-22T21:00:00.000Z", dec!(1.00), vec![item("C", 1, "Tesco", dec!(1.00))]).await;
    let next = place(&db, user.id, "2025-07-23T00:30:00.000Z", dec!(1.00), vec![item("D", 1, "Tesco", dec!(1.00))]).await;

    let ids = |orders: Vec<royalbee_backend::models::order::OrderResponse>| -> Vec<i32> {
        orders.into_iter().map(|o| o.id).collect()
    };

    let all = admin::list_orders(&db, &AdminOrdersQuery::default()).await.unwrap();
    assert_eq!(ids(all), vec![next, late, mid, early]);

    let day = AdminOrdersQuery {
        date: Some("2025-07-22".to_string()),
        ..Default::default()
    };
    assert_eq!(ids(admin::list_orders(&db, &day).await.unwrap()), vec![late, mid]);

    let range = AdminOrdersQuery {
        from: Some("2025-07-21".to_string()),
        to: Some("2025-07-22".to_string()),
        ..Default::default()
    };
    assert_eq!(ids(admin::list_orders(&db, &range).await.unwrap()), vec![late, mid]);

    let with_items = admin::list_orders(&db, &day).await.unwrap();
    assert_eq!(with_items[0].items[0].product_name, "C");
}

#[tokio::test]
async fn user_listing_includes_points() {
    let db = setup_test_db().await.unwrap();
    let user = create_user(&db, "points@example.com", "pw", None).await;
    seed::ensure_admin(&db, "admin-pass").await.unwrap();

    place(&db, user.id, "2025-07-23T09:00:00.000Z", dec!(55.00), vec![item("Honey", 5, "Royal Bee", dec!(11.00))]).await;

    let users = admin::list_users(&db).await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].email, "points@example.com");
    assert_eq!(users[0].points, 10);
    assert_eq!(users[1].email, seed::ADMIN_EMAIL);
    assert_eq!(users[1].role.as_deref(), Some("admin"));

    // Idempotent
    assert!(!seed::ensure_admin(&db, "admin-pass").await.unwrap());
}
