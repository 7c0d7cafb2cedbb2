//! # Recipebook DB
//!
//! Connection pool and schema migrations for the Recipebook API.
//!
//! # Example
//!
//! ```ignore
//! use recipebook_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&database_url).await?;
//! run_migrations(&pool).await?;
//! ```

use sqlx::postgres::PgPoolOptions;
use tracing::info;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

const MAX_CONNECTIONS: u32 = 10;

/// Connects a PostgreSQL pool to `database_url`.
///
/// The returned pool is cheaply cloneable and is shared through the
/// application state for all request handlers.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await?;

    info!(max_connections = MAX_CONNECTIONS, "database pool ready");
    Ok(pool)
}

/// A pool that opens connections on first use.
///
/// Used where a router has to be built without a reachable database, such as
/// tests that never get past authentication.
pub fn lazy_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy(database_url)
}

/// Applies pending migrations from the workspace `migrations/` directory.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("database migrations applied");
    Ok(())
}
