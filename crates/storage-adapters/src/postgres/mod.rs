//! # Postgres adapter
//!
//! This module implements the data mapping between the Postgres relational
//! model and the `domains` models. One `PgStore` implements every
//! repository port over a shared connection pool.

mod engagement;
mod suggestions;
mod users;
mod videos;

use std::time::Duration;

use domains::DomainError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{error, info};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Opens a pool against `url`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(url)
            .await?;
        info!(max_connections, "postgres pool ready");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Applies the embedded migrations in `migrations/`.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("migrations applied");
        Ok(())
    }
}

/// Maps driver failures onto the domain taxonomy. Constraint violations the
/// services can act on become `Conflict`; everything else is `Internal`.
pub(crate) fn db_error(e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return DomainError::Conflict(db.message().to_string());
        }
        if db.is_foreign_key_violation() {
            return DomainError::ValidationError("referenced record does not exist".into());
        }
    }
    error!(error = %e, "database operation failed");
    DomainError::Internal(e.to_string())
}
