//! Registrar Observability
//!
//! Structured logging setup for Registrar binaries.
//!
//! - Console output through `tracing-subscriber`, filtered by `RUST_LOG` or `LOG_LEVEL`
//! - Daily rolling error log and JSON log through `tracing-appender`
//!
//! File logging is compiled in by the `observability` feature (default) and
//! can be switched off at runtime with `OBSERVABILITY_ENABLED=false`.
//!
//! # Examples
//!
//! ```no_run
//! registrar_observability::init_tracing();
//! tracing::info!("ready");
//! ```

mod basic_logging;

#[cfg(feature = "observability")]
pub mod logging;

pub use basic_logging::init_basic_console_logging;

#[cfg(feature = "observability")]
pub use logging::{init_tracing, is_observability_enabled};

#[cfg(not(feature = "observability"))]
pub mod stubs {
    /// File logging is not compiled in.
    pub fn is_observability_enabled() -> bool {
        false
    }

    pub fn init_tracing() {
        super::init_basic_console_logging();
    }
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
