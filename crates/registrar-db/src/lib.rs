//! # Registrar DB
//!
//! PostgreSQL connection pool and embedded schema migrations.
//!
//! The pool is the document store every guard and service talks to. Unique
//! indexes created by the migrations are the authoritative uniqueness
//! guarantee; the guards only add friendlier errors on top.
//!
//! # Example
//!
//! ```ignore
//! use registrar_config::DatabaseConfig;
//! use registrar_db::{init_db_pool, run_migrations};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sqlx::Error> {
//!     let config = DatabaseConfig::from_env().expect("DATABASE_URL must be set");
//!     let pool = init_db_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     Ok(())
//! }
//! ```

use registrar_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

/// Opens a PostgreSQL pool sized by [`DatabaseConfig::max_connections`].
///
/// The returned pool is cheaply cloneable and is meant to be created once at
/// startup.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    info!(max_connections = config.max_connections, "database pool ready");
    Ok(pool)
}

/// Applies the embedded migrations under `migrations/` at the workspace root.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("database migrations applied");
    Ok(())
}

pub use sqlx::PgPool;
