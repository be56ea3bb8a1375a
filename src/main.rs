use tracing::info;

use slotbook::db::seed;
use slotbook::{Config, Database};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = slotbook::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        slotbook::logging::init_console_only(&config.logging.level);
    }

    info!("slotbook - appointment scheduling backend");

    let db = match Database::open(&config.database.path).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Failed to open database {}: {e}", config.database.path);
            std::process::exit(1);
        }
    };

    if let Err(e) = seed::seed_defaults(&db).await {
        eprintln!("Failed to seed default records: {e}");
        std::process::exit(1);
    }

    info!(
        database = %config.database.path,
        business = %config.business.name,
        "Store ready"
    );
}
