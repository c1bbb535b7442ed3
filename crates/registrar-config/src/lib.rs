//! # Registrar Config
//!
//! Configuration types for the Registrar record layer, loaded from
//! environment variables:
//!
//! - [`bcrypt`]: Password hashing cost factor (`BCRYPT_SALT_ROUNDS`)
//! - [`database`]: PostgreSQL connection settings (`DATABASE_URL`, `DATABASE_MAX_CONNECTIONS`)
//!
//! # Example
//!
//! ```ignore
//! use registrar_config::{BcryptConfig, DatabaseConfig};
//!
//! let bcrypt_config = BcryptConfig::from_env();
//! let database_config = DatabaseConfig::from_env().expect("DATABASE_URL must be set");
//! ```

pub mod bcrypt;
pub mod database;

pub use bcrypt::BcryptConfig;
pub use database::DatabaseConfig;
