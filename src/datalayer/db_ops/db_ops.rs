use crate::datalayer::db_ops::constants::DbConfig;
use crate::errors::{StoreError, StoreResult};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use tracing::{error, info};

/// Database connection manager owning the shared pool
#[derive(Clone)]
pub struct DbManager {
    pool: PgPool,
}

impl DbManager {
    /// Creates the connection pool described by `config`.
    pub async fn new(config: DbConfig) -> StoreResult<Self> {
        info!("Initializing database connection pool...");

        let mut options = PgConnectOptions::from_str(&config.database_url)
            .map_err(|e| StoreError::ConnectionError(format!("invalid DATABASE_URL: {}", e)))?;
        if let Some(name) = &config.database_name {
            options = options.database(name);
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connection_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .connect_with(options)
            .await
            .map_err(|e| {
                error!("Failed to create database pool: {}", e);
                StoreError::ConnectionError(e.to_string())
            })?;

        info!("Database connection pool created successfully");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Applies the embedded migrations. Already-applied migrations are skipped.
    pub async fn migrate(&self) -> StoreResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Health check - verifies database connectivity
    pub async fn health_check(&self) -> StoreResult<DatabaseHealth> {
        let start = std::time::Instant::now();

        sqlx::query("SELECT 1").execute(&self.pool).await?;

        let latency = start.elapsed();

        Ok(DatabaseHealth {
            is_healthy: true,
            latency_ms: latency.as_millis() as u64,
            pool_size: self.pool.size(),
            idle_connections: self.pool.num_idle(),
        })
    }

    /// Graceful shutdown - closes all connections in the pool
    pub async fn shutdown(&self) {
        info!("Shutting down database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }

    /// Test database connection and log pool statistics
    pub async fn test_connection(&self) -> StoreResult<()> {
        info!("Testing database connection...");

        let health = self.health_check().await?;

        info!(
            pool_size = health.pool_size,
            idle = health.idle_connections,
            latency_ms = health.latency_ms,
            "Database connection test successful"
        );

        Ok(())
    }
}

/// Database health status
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DatabaseHealth {
    pub is_healthy: bool,
    pub latency_ms: u64,
    pub pool_size: u32,
    pub idle_connections: usize,
}

/// Connect, migrate and ping the database.
///
/// The returned manager is ready to serve traffic.
pub async fn initialize_database(config: DbConfig) -> StoreResult<DbManager> {
    info!("=== Database Initialization Started ===");

    let db_manager = DbManager::new(config).await?;
    db_manager.migrate().await?;
    db_manager.test_connection().await?;

    info!("=== Database Initialization Completed ===");

    Ok(db_manager)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_url_is_a_connection_error() {
        let config = DbConfig::from_lookup(|_| None).set_database_url("not a url".to_string());

        let result = DbManager::new(config).await;
        assert!(matches!(result, Err(StoreError::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_db_manager_creation() {
        // This test requires a running PostgreSQL instance
        let _ = dotenvy::dotenv();
        if std::env::var("DATABASE_URL").is_err() {
            return;
        }

        let result = initialize_database(DbConfig::default()).await;

        if let Ok(manager) = result {
            assert!(manager.health_check().await.is_ok());
            manager.shutdown().await;
        }
    }
}
