use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Builds the filter shared by every console setup.
///
/// `RUST_LOG` wins when set; otherwise `LOG_LEVEL` (default "info") applies to
/// the registrar crates and noisy dependencies are held at warn.
pub(crate) fn default_filter() -> EnvFilter {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "registrar={level},registrar_core={level},registrar_db={level},sqlx=warn",
            level = log_level
        ))
    })
}

/// Console-only logging, used when file logging is disabled at build or run time.
pub fn init_basic_console_logging() {
    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(true)
        .with_filter(default_filter());

    // Another subscriber may already be installed by an embedding binary
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
