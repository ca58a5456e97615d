use dotenvy::dotenv;
use plantation_planner::{
    config::{database, settings},
    core::plantation,
    dashboard::{self, DashboardData},
    errors::Result,
};
use std::env::{self, VarError};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Load .env file first so RUST_LOG from it reaches the filter
    dotenv().ok();

    // 2. Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 3. Load the application configuration
    let config_path = match env::var("CONFIG_PATH") {
        Ok(path) => path,
        Err(VarError::NotPresent) => DEFAULT_CONFIG_PATH.to_string(),
        Err(e) => {
            error!("CONFIG_PATH is not valid unicode");
            return Err(e.into());
        }
    };
    let app_config = settings::load_config_or_default(&config_path)
        .inspect_err(|e| error!("Failed to load configuration: {e}"))?;
    info!("Loaded configuration from {config_path}");

    // 4. Connect and create tables
    let db = database::create_connection()
        .await
        .inspect(|_| info!("Database connected."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Seed configured plantations
    let seeded = plantation::seed_plantations(&db, &app_config.plantations)
        .await
        .inspect_err(|e| error!("Failed to seed plantations: {e}"))?;
    if seeded > 0 {
        info!("Seeded {seeded} plantation(s) from configuration.");
    }

    // 6. Run the dashboard until Ctrl-C
    dashboard::run(DashboardData::new(db, app_config.dashboard)).await
}
