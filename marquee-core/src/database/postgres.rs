use std::{fmt, time::Duration};

use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

use crate::{
    database::infrastructure::postgres::repositories::{
        PostgresTitleRepository, PostgresUserOverlayRepository,
    },
    error::{CatalogError, Result},
};

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    max_connections: u32,
    titles: PostgresTitleRepository,
    user_overlays: PostgresUserOverlayRepository,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl PostgresDatabase {
    pub async fn new(connection_string: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(connection_string)
            .await
            .map_err(|e| {
                CatalogError::StoreUnavailable(format!("Failed to connect to database: {}", e))
            })?;

        info!(max_connections, "connected to postgres");
        Ok(Self::from_pool(pool, max_connections))
    }

    pub fn from_pool(pool: PgPool, max_connections: u32) -> Self {
        Self {
            titles: PostgresTitleRepository::new(pool.clone()),
            user_overlays: PostgresUserOverlayRepository::new(pool.clone()),
            pool,
            max_connections,
        }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        crate::MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| CatalogError::StoreUnavailable(format!("Failed to run migrations: {}", e)))?;
        info!("database migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn titles(&self) -> PostgresTitleRepository {
        self.titles.clone()
    }

    pub fn user_overlays(&self) -> PostgresUserOverlayRepository {
        self.user_overlays.clone()
    }
}
