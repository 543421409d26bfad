use std::env;

use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use royalbee_backend::seed;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,royalbee_backend=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    migration::Migrator::up(&db, None).await?;

    match env::var("ADMIN_PASSWORD") {
        Ok(password) if !password.is_empty() => {
            if seed::ensure_admin(&db, &password).await? {
                tracing::info!("Created admin user {}", seed::ADMIN_EMAIL);
            } else {
                tracing::info!("Admin user {} already exists", seed::ADMIN_EMAIL);
            }
        }
        _ => tracing::warn!("ADMIN_PASSWORD not set, skipping admin user"),
    }

    let count = seed::seed_catalog(&db).await?;
    tracing::info!("Database seeded with {} products", count);

    Ok(())
}
