//! Shared application state

use crate::{
    config::{Config, StoreBackend},
    db::{InMemoryShipStore, PostgresShipStore, ShipStore},
    services::ShipService,
    Result,
};
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ship_service: Arc<ShipService>,
}

impl AppState {
    /// Initialize the application state with the store selected by `database.backend`.
    pub async fn new(config: Config) -> Result<Self> {
        tracing::info!(backend = ?config.database.backend, "Initializing application state...");

        let store: Arc<dyn ShipStore> = match config.database.backend {
            StoreBackend::Postgres => {
                let db_pool = create_db_pool(&config).await?;

                if config.database.run_migrations {
                    tracing::info!("Running database migrations...");
                    sqlx::migrate!("./migrations").run(&db_pool).await?;
                }

                Arc::new(PostgresShipStore::new(db_pool))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using the in-memory ship store; data will not survive a restart");
                Arc::new(InMemoryShipStore::new())
            }
        };

        Ok(Self::with_store(config, store))
    }

    /// Build state around an existing store.
    pub fn with_store(config: Config, store: Arc<dyn ShipStore>) -> Self {
        let ship_service = Arc::new(ShipService::new(store, config.ships.clone()));

        tracing::info!("Application state initialized");

        Self {
            config: Arc::new(config),
            ship_service,
        }
    }
}

async fn create_db_pool(config: &Config) -> Result<PgPool> {
    tracing::info!("Creating database connection pool...");

    let statement_timeout = config.database.statement_timeout_seconds;
    let lock_timeout = config.database.lock_timeout_seconds;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .min_connections(config.database.pool_min_size)
        .max_connections(config.database.pool_max_size)
        .acquire_timeout(std::time::Duration::from_secs(
            config.database.pool_timeout_seconds,
        ))
        .after_connect(move |conn, _meta| {
            Box::pin(async move {
                // Set statement timeout (max query execution time)
                sqlx::query(&format!("SET statement_timeout = '{}s'", statement_timeout))
                    .execute(&mut *conn)
                    .await?;

                // Set lock timeout (max lock wait time - fail fast)
                sqlx::query(&format!("SET lock_timeout = '{}s'", lock_timeout))
                    .execute(&mut *conn)
                    .await?;

                Ok(())
            })
        })
        .connect(&config.database.url)
        .await
        .map_err(crate::Error::Database)?;

    tracing::info!(
        "Database pool created (min: {}, max: {})",
        config.database.pool_min_size,
        config.database.pool_max_size
    );

    Ok(pool)
}
