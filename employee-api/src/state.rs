//! Application state

use std::sync::Arc;

use sqlx::PgPool;
use sqlx::pool::PoolConnection;
use sqlx::postgres::Postgres;

use crate::config::Config;
use crate::db;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL connection pool
    pub pool: PgPool,
    pub config: Arc<Config>,
}

impl AppState {
    /// Connect the pool and apply migrations
    pub async fn new(config: &Config) -> Result<Self, sqlx::Error> {
        let pool = db::connect(config).await?;
        Ok(Self::from_pool(pool, config.clone()))
    }

    pub fn from_pool(pool: PgPool, config: Config) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }

    /// Check out a connection for one request; returned to the pool on drop
    pub async fn acquire(&self) -> Result<PoolConnection<Postgres>, sqlx::Error> {
        self.pool.acquire().await
    }
}
