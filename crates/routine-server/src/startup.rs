//! Server startup utilities.

use routine_config::{AppConfig, ObservabilityConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{},routine=debug,tower_http=debug",
            config.log_level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    ____              __  _
   / __ \____  __  __/ /_(_)___  ___
  / /_/ / __ \/ / / / __/ / __ \/ _ \
 / _, _/ /_/ / /_/ / /_/ / / / /  __/
/_/ |_|\____/\__,_/\__/_/_/ /_/\___/

                 Companies & Employees API
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let base = config
        .server
        .public_url
        .clone()
        .unwrap_or_else(|| format!("http://{}", config.server.addr()));
    let base = base.trim_end_matches('/');

    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("Environment: {}", config.app.environment);
    info!("REST API:    {}/api/companies", base);
    info!("Health:      {}/health", base);
    info!("Swagger UI:  {}/swagger-ui", base);
    info!("Database:    {}", config.database.url);
    info!("{}", separator);
}
