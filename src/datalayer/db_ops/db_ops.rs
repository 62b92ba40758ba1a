use crate::datalayer::db_ops::constants::DbConfig;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use tracing::{error, info};

/// Owns the PostgreSQL connection pool shared by the repository
#[derive(Clone)]
pub struct DbManager {
    pool: Arc<PgPool>,
}

impl DbManager {
    /// Creates the connection pool from the given configuration
    pub async fn new(config: DbConfig) -> Result<Self, sqlx::Error> {
        info!("Initializing database connection pool...");

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connection_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .connect(&config.database_url)
            .await
            .map_err(|e| {
                error!("Failed to create database pool: {}", e);
                e
            })?;

        info!("Database connection pool created successfully");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Get an Arc clone of the pool for sharing across tasks
    pub fn pool_arc(&self) -> Arc<PgPool> {
        Arc::clone(&self.pool)
    }

    /// Apply the embedded schema migrations (creates the customers table)
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(self.pool.as_ref())
            .await
            .map_err(|e| {
                error!("Database migration failed: {}", e);
                sqlx::Error::from(e)
            })?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Verifies connectivity with a trivial query
    pub async fn health_check(&self) -> Result<DatabaseHealth, sqlx::Error> {
        let start = std::time::Instant::now();

        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;

        let latency = start.elapsed();

        Ok(DatabaseHealth {
            is_healthy: true,
            latency_ms: latency.as_millis() as u64,
            pool_size: self.pool.size(),
            idle_connections: self.pool.num_idle(),
        })
    }

    /// Closes all connections in the pool
    pub async fn shutdown(&self) {
        info!("Shutting down database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }

    /// Test database connection and log pool statistics
    pub async fn test_connection(&self) -> Result<(), sqlx::Error> {
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
#[derive(Debug, Clone)]
pub struct DatabaseHealth {
    pub is_healthy: bool,
    pub latency_ms: u64,
    pub pool_size: u32,
    pub idle_connections: usize,
}

/// Initialize the store at application startup: pool, migrations, ping
pub async fn initialize_database() -> Result<DbManager, sqlx::Error> {
    initialize_database_with_config(DbConfig::default()).await
}

/// Initialize the store with a custom configuration
pub async fn initialize_database_with_config(config: DbConfig) -> Result<DbManager, sqlx::Error> {
    info!("=== Database Initialization Started ===");

    let db_manager = DbManager::new(config).await?;
    db_manager.run_migrations().await?;
    db_manager.test_connection().await?;

    info!("=== Database Initialization Completed ===");

    Ok(db_manager)
}
