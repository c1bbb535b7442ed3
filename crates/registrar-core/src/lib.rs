//! # Registrar Core
//!
//! Core types, errors, and utilities shared by the Registrar crates.
//!
//! - [`errors`]: The guard/store error taxonomy with HTTP response conversion
//! - [`password`]: bcrypt hashing and verification, sync and off-thread
//! - [`serde`]: Deserialization helpers for incoming records
//!
//! # Example
//!
//! ```ignore
//! use registrar_core::errors::AppError;
//! use registrar_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found("Department not found");
//!
//! let hash = hash_password("secure_password", 12)?;
//! assert!(verify_password("secure_password", &hash)?);
//! ```

pub mod errors;
pub mod password;
pub mod serde;

pub use errors::{AppError, AppResult, FieldViolation};
pub use password::{hash_password, hash_password_async, verify_password, verify_password_async};
