#![allow(dead_code)]

use std::env;
use std::path::PathBuf;

use migration::{Migrator, MigratorTrait};
use royalbee_backend::config::AuthSettings;
use royalbee_backend::entities::users;
use royalbee_backend::models::order::{OrderItemInput, OrderSubmission};
use royalbee_backend::services::account;
use royalbee_backend::AppState;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, DbErr, Set};
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Fresh in-memory SQLite database with all migrations applied.
/// The pool holds a single connection, so every call sees the same data.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// File-backed SQLite with two pooled connections, so two transactions can
/// be open at once. The file is removed on drop.
pub struct SharedTestDb {
    pub db: DatabaseConnection,
    path: PathBuf,
}

impl Drop for SharedTestDb {
    fn drop(&mut self) {
        for suffix in ["", "-journal", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

pub async fn setup_shared_test_db() -> Result<SharedTestDb, DbErr> {
    let path = env::temp_dir().join(format!("royalbee-test-{}.db", Uuid::new_v4()));

    let mut options = ConnectOptions::new(format!("sqlite://{}?mode=rwc", path.display()));
    options.max_connections(2).sqlx_logging(false);

    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;
    Ok(SharedTestDb { db, path })
}

/// Postgres from TEST_DATABASE_URL, migrated. `None` when the variable is unset.
pub async fn postgres_test_db() -> Option<DatabaseConnection> {
    let database_url = env::var("TEST_DATABASE_URL").ok()?;

    let db = Database::connect(&database_url)
        .await
        .expect("Failed to connect to TEST_DATABASE_URL");
    Migrator::up(&db, None)
        .await
        .expect("Failed to migrate TEST_DATABASE_URL");
    Some(db)
}

pub async fn test_state() -> AppState {
    let db = setup_test_db().await.expect("Failed to set up test DB");
    AppState {
        db,
        auth: AuthSettings::new(TEST_SECRET),
    }
}

pub async fn create_user(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
    role: Option<&str>,
) -> users::Model {
    users::ActiveModel {
        email: Set(email.to_string()),
        hashed_password: Set(account::hash_password(password).unwrap()),
        name: Set(email.split('@').next().unwrap_or("user").to_string()),
        points: Set(0),
        role: Set(role.map(str::to_string)),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert user")
}

pub fn item(product_name: &str, quantity: i32, retailer: &str, price: Decimal) -> OrderItemInput {
    OrderItemInput {
        product_name: product_name.to_string(),
        quantity,
        retailer: retailer.to_string(),
        price,
    }
}

pub fn submission(user_id: i32, total: Decimal, items: Vec<OrderItemInput>) -> OrderSubmission {
    OrderSubmission {
        user_id,
        date: "2025-07-22T10:15:00.000Z".to_string(),
        total,
        payment: "Credit Card".to_string(),
        address: "221B Baker Street, London".to_string(),
        items,
    }
}
