use std::env;

use sea_orm::Database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use royalbee_backend::services::account;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: cargo run --bin set_admin_password <email> <new_password>");
        std::process::exit(1);
    }

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let db = Database::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    match account::set_password(&db, &args[1], &args[2]).await {
        Ok(user) => {
            tracing::info!("Password for {} updated successfully", user.email);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Failed to update password for {}: {}", args[1], e);
            Err(e.into())
        }
    }
}
