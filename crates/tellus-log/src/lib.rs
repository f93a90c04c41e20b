//! Structured logging for the tellus terrain toolkit.
//!
//! Provides structured, span-based, filterable logging via the `tracing`
//! ecosystem: console output with uptime timestamps and thread names (the
//! generation worker threads are named), plus JSON file logging in debug
//! builds for post-mortem analysis of generation passes.

use std::path::Path;

use tellus_config::LoggingSettings;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Sets up structured logging with:
/// - Console output with uptime timestamps, module paths, and thread names
/// - JSON file logging in debug builds (optional)
/// - Environment-based filtering (respects RUST_LOG)
/// - Integration with the `log_level` config setting
///
/// # Arguments
///
/// * `log_dir` - Optional directory for JSON log files (debug builds only)
/// * `debug_build` - Whether this is a debug build (enables file logging)
/// * `settings` - Optional logging settings for log level override
pub fn init_logging(
    log_dir: Option<&Path>,
    debug_build: bool,
    settings: Option<&LoggingSettings>,
) {
    let filter_str = match settings {
        Some(settings) if !settings.log_level.is_empty() => settings.log_level.clone(),
        _ => "info".to_string(),
    };

    // Settings give the default; RUST_LOG wins when set.
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true) // the planet-gen worker is named
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    // In debug builds, also log to a file for post-mortem analysis.
    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join("tellus.log"))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Create an `EnvFilter` with the default filter string (`info` everywhere).
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new("info")
}
