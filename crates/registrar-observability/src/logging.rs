use std::fs;

use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::basic_logging::{default_filter, init_basic_console_logging};

const DEFAULT_LOG_DIR: &str = "storage/logs";

/// `OBSERVABILITY_ENABLED=false` turns file logging off without a rebuild.
pub fn is_observability_enabled() -> bool {
    std::env::var("OBSERVABILITY_ENABLED")
        .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no"))
        .unwrap_or(true)
}

/// Console logging plus daily rolling files under `LOG_DIR`:
/// `registrar.log` receives errors as plain text, `registrar.json` receives
/// info and above as JSON lines.
pub fn init_tracing() {
    if !is_observability_enabled() {
        init_basic_console_logging();
        return;
    }

    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string());
    if let Err(e) = fs::create_dir_all(&log_dir) {
        init_basic_console_logging();
        warn!(log_dir = %log_dir, error = %e, "cannot create log directory, file logging disabled");
        return;
    }

    let console_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(default_filter());

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "registrar.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_filter(EnvFilter::new("error"));

    let json_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "registrar.json");
    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    if tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .try_init()
        .is_ok()
    {
        info!(log_dir = %log_dir, "tracing initialized with file logging");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_unless_explicitly_disabled() {
        // SAFETY: this is the only test in the crate touching the variable.
        unsafe { std::env::remove_var("OBSERVABILITY_ENABLED") };
        assert!(is_observability_enabled());

        unsafe { std::env::set_var("OBSERVABILITY_ENABLED", "FALSE") };
        assert!(!is_observability_enabled());

        unsafe { std::env::set_var("OBSERVABILITY_ENABLED", "true") };
        assert!(is_observability_enabled());

        unsafe { std::env::remove_var("OBSERVABILITY_ENABLED") };
    }
}
