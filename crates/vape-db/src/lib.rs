//! # Vape DB
//!
//! The user directory: the persistence port the HTTP layer talks to, plus
//! its implementations.
//!
//! - [`directory`]: the [`UserDirectory`] trait and [`DirectoryError`]
//! - [`postgres`]: the PostgreSQL-backed directory used in production
//! - `memory` (feature `test-utils`): an in-memory directory that records
//!   every call, for tests
//!
//! # Example
//!
//! ```ignore
//! use vape_db::{PgUserDirectory, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool().await?;
//! run_migrations(&pool).await?;
//! let directory = PgUserDirectory::new(pool);
//! let user = directory.get(5).await?;
//! ```

pub mod directory;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;

use std::env;

use anyhow::Context;

pub use directory::{DirectoryError, UserDirectory};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::{DirectoryCall, MemoryUserDirectory};
pub use postgres::PgUserDirectory;
pub use sqlx::PgPool;

/// Connects a PostgreSQL pool using `DATABASE_URL`.
pub async fn init_db_pool() -> anyhow::Result<PgPool> {
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

/// Applies the embedded migrations in `crates/vape-db/migrations`.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!()
        .run(pool)
        .await
        .context("Failed to run database migrations")
}
