//! # Routine Server
//!
//! Main entry point for the Routine companies and employees API.

use routine_config::{AppConfig, ConfigLoader};
use routine_core::RoutineResult;
use routine_server::{
    app::AppBuilder,
    startup::{init_logging, print_banner, print_startup_info},
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match ConfigLoader::from_default_location() {
        Ok(loader) => loader.into_config(),
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.observability);
    print_banner();

    info!("Starting Routine Server...");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config).await {
        error!("Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> RoutineResult<()> {
    print_startup_info(&config);

    let app = AppBuilder::new().with_config(config).build().await?;
    app.serve().await
}
