//! storage-adapters
//!
//! Implementations of the repository ports in `domains`.
//!
//! - [`memory::MemoryStore`]: always compiled, no external services.
//! - [`postgres::PgStore`]: behind the `db-postgres` feature, backed by sqlx.

pub mod memory;

#[cfg(feature = "db-postgres")]
pub mod postgres;

pub use memory::MemoryStore;

#[cfg(feature = "db-postgres")]
pub use postgres::PgStore;
