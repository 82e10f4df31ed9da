use std::sync::Arc;
use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::core::config::{DatabaseConfig, StorageBackend};
use crate::modules::store::{CatalogStore, MemoryCatalogStore, PgCatalogStore};

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}

/// Open the configured catalog backend, migrating the schema for Postgres
pub async fn connect_store(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn CatalogStore>> {
    match config.backend {
        StorageBackend::Postgres => {
            let pool = create_pool(config).await?;
            tracing::info!("Database connection pool created");

            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
            tracing::info!("Database migrations completed successfully");

            Ok(Arc::new(PgCatalogStore::new(pool)))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory catalog store; data is lost on restart");
            Ok(Arc::new(MemoryCatalogStore::new()))
        }
    }
}
