// src/lib.rs

use std::time::Duration;

use axum::{
    http::StatusCode,
    routing::{delete, get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AuthSettings;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub auth: AuthSettings,
}

pub mod entities {
    pub mod prelude;
    pub mod cart_items;
    pub mod order_items;
    pub mod orders;
    pub mod products;
    pub mod retailers;
    pub mod users;
}

pub mod services {
    pub mod account;
    pub mod admin;
    pub mod cart;
    pub mod catalog;
    pub mod order;
}

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod seed;

/// Requests running longer than `timeout` are answered with 408.
pub fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

/// Full HTTP surface. Timeouts are layered on by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        // Accounts
        .route("/register", post(handlers::account::register))
        .route("/token", post(handlers::account::login))
        .route("/me", get(handlers::account::me))
        // Catalog
        .route(
            "/products",
            get(handlers::catalog::list_products).post(handlers::catalog::create_product),
        )
        .route(
            "/products/{id}",
            get(handlers::catalog::get_product)
                .put(handlers::catalog::update_product)
                .delete(handlers::catalog::delete_product),
        )
        .route("/products/{id}/best-price", get(handlers::catalog::best_price))
        .route("/products/{id}/retailers", post(handlers::catalog::add_retailer))
        .route("/retailers/{id}", delete(handlers::catalog::delete_retailer))
        // Cart
        .route(
            "/api/cart",
            get(handlers::cart::get_cart).post(handlers::cart::add_to_cart),
        )
        .route("/api/cart/{id}", delete(handlers::cart::remove_from_cart))
        // Orders
        .route(
            "/api/orders",
            get(handlers::order::get_orders).post(handlers::order::create_order),
        )
        // Admin
        .route("/admin/login", post(handlers::account::admin_login))
        .route("/admin/metrics", get(handlers::admin::metrics))
        .route("/admin/users", get(handlers::admin::users))
        .route("/admin/orders", get(handlers::admin::orders))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
