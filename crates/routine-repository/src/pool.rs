//! Database connection pool management.

use async_trait::async_trait;
use routine_config::DatabaseConfig;
use routine_core::{HealthCheck, HealthStatus, Interface, RoutineError, RoutineResult};
use shaku::Component;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    ConnectOptions,
};
use std::str::FromStr;
use tracing::{info, warn};

/// Demo companies and employees inserted into an empty store.
const SEED_SQL: &str = include_str!("../sql/seed.sql");

/// Interface for database pool operations.
///
/// This trait abstracts database pool functionality for dependency injection.
#[async_trait]
pub trait DatabasePoolInterface: Interface + Send + Sync {
    /// Returns a reference to the underlying SQLite pool.
    fn inner(&self) -> &SqlitePool;

    /// Checks if the database connection is healthy.
    async fn health_check(&self) -> RoutineResult<()>;

    /// Runs database migrations.
    async fn run_migrations(&self) -> RoutineResult<()>;

    /// Inserts the demo data set when no company exists yet.
    async fn seed(&self) -> RoutineResult<bool>;

    /// Closes the database pool.
    async fn close(&self);
}

/// Database pool wrapper.
#[derive(Component)]
#[shaku(interface = DatabasePoolInterface)]
pub struct DatabasePool {
    pool: SqlitePool,
}

impl DatabasePool {
    /// Creates a new database pool from configuration.
    pub async fn new(config: &DatabaseConfig) -> RoutineResult<Self> {
        info!("Connecting to SQLite database...");

        if !config.url.starts_with("sqlite:") {
            return Err(RoutineError::Configuration(format!(
                "Unsupported database URL: {}",
                config.url
            )));
        }

        let mut options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| RoutineError::Configuration(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);
        if !config.log_queries {
            options = options.disable_statement_logging();
        }

        // Every connection to `:memory:` opens its own empty database.
        let in_memory = config.url.contains(":memory:");
        let max_connections = if in_memory { 1 } else { config.max_connections };

        let mut pool_options = SqlitePoolOptions::new()
            .min_connections(config.min_connections.min(max_connections))
            .max_connections(max_connections)
            .acquire_timeout(config.connect_timeout());
        pool_options = if in_memory {
            pool_options.idle_timeout(None).max_lifetime(None)
        } else {
            pool_options.idle_timeout(Some(config.idle_timeout()))
        };

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            warn!("Failed to connect to database: {}", e);
            RoutineError::Database(format!("Failed to connect: {}", e))
        })?;

        info!("SQLite connection pool established");
        Ok(Self { pool })
    }

    /// Creates DatabasePool with a pre-existing pool (for Shaku injection).
    #[must_use]
    pub fn with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a fresh in-memory database with migrations applied.
    pub async fn in_memory() -> RoutineResult<Self> {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            min_connections: 1,
            max_connections: 1,
            connect_timeout_secs: 5,
            ..DatabaseConfig::default()
        };
        let pool = Self::new(&config).await?;
        DatabasePoolInterface::run_migrations(&pool).await?;
        Ok(pool)
    }
}

#[async_trait]
impl DatabasePoolInterface for DatabasePool {
    fn inner(&self) -> &SqlitePool {
        &self.pool
    }

    async fn health_check(&self) -> RoutineResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| RoutineError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn run_migrations(&self) -> RoutineResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RoutineError::Database(format!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    async fn seed(&self) -> RoutineResult<bool> {
        let companies: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM companies")
            .fetch_one(&self.pool)
            .await?;
        if companies > 0 {
            info!("Skipping seed data, {} companies present", companies);
            return Ok(false);
        }

        let mut tx = self.pool.begin().await?;
        sqlx::Executor::execute(&mut *tx, sqlx::raw_sql(SEED_SQL)).await?;
        tx.commit().await?;
        info!("Seed data inserted");
        Ok(true)
    }

    async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

#[async_trait]
impl HealthCheck for DatabasePool {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> HealthStatus {
        match DatabasePoolInterface::health_check(self).await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        }
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}

/// Creates a shared database pool.
pub async fn create_pool(config: &DatabaseConfig) -> RoutineResult<std::sync::Arc<DatabasePool>> {
    let pool = DatabasePool::new(config).await?;
    Ok(std::sync::Arc::new(pool))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_pool_is_healthy() {
        let pool = DatabasePool::in_memory().await.unwrap();
        assert!(pool.check().await.is_healthy());
        assert_eq!(pool.name(), "database");
    }

    #[tokio::test]
    async fn test_seed_runs_once() {
        let pool = DatabasePool::in_memory().await.unwrap();
        assert!(pool.seed().await.unwrap());
        assert!(!pool.seed().await.unwrap());

        let companies: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM companies")
            .fetch_one(pool.inner())
            .await
            .unwrap();
        assert!(companies > 0);
    }

    #[tokio::test]
    async fn test_invalid_url_is_configuration_error() {
        let config = DatabaseConfig {
            url: "postgres://nope".to_string(),
            ..DatabaseConfig::default()
        };
        let err = DatabasePool::new(&config).await.unwrap_err();
        assert_eq!(err.error_code(), "CONFIGURATION_ERROR");
    }
}
