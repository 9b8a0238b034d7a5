//! Application builder.

use crate::di::build_module;
use axum::Router;
use routine_config::AppConfig;
use routine_core::{HealthCheck, RoutineError, RoutineResult};
use routine_repository::{create_pool, DatabasePool, DatabasePoolInterface};
use routine_rest::{create_router, AppState};
use routine_service::build_registry;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};
use url::Url;

/// Application builder for constructing the server.
pub struct AppBuilder {
    config: Option<AppConfig>,
}

impl AppBuilder {
    /// Creates a new application builder.
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Connects the database and assembles the router.
    pub async fn build(self) -> RoutineResult<App> {
        let config = self.config.unwrap_or_default();

        let db_pool = create_pool(&config.database).await?;
        if config.database.run_migrations {
            db_pool.run_migrations().await?;
        }
        if config.database.seed {
            db_pool.seed().await?;
        }

        let mappings = Arc::new(build_registry()?);
        let module = build_module(&db_pool, mappings, config.paging);

        let public_url = parse_public_url(config.server.public_url.as_deref())?;
        let state = AppState::from_module(module.as_ref())
            .with_health_check(Arc::clone(&db_pool) as Arc<dyn HealthCheck>)
            .with_public_url(public_url);

        let router = create_router(state, &config.server);

        Ok(App {
            config,
            db_pool,
            router,
        })
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully wired application, ready to serve.
pub struct App {
    config: AppConfig,
    db_pool: Arc<DatabasePool>,
    router: Router,
}

impl App {
    /// Returns the configuration the application was built with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns a handle to the HTTP router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Binds the configured address and serves until a shutdown signal.
    pub async fn serve(self) -> RoutineResult<()> {
        let addr = self.config.server.addr();
        info!("Starting REST server on http://{}", addr);

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| RoutineError::Internal(format!("Failed to bind {}: {}", addr, e)))?;

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| RoutineError::Internal(format!("REST server error: {}", e)))?;

        self.db_pool.close().await;
        info!("Server shutdown complete");
        Ok(())
    }
}

fn parse_public_url(public_url: Option<&str>) -> RoutineResult<Option<Url>> {
    public_url
        .map(|raw| {
            Url::parse(raw).map_err(|e| {
                RoutineError::Configuration(format!("Invalid server.public_url {}: {}", raw, e))
            })
        })
        .transpose()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
