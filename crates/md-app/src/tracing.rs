//! Tracing and logging configuration
//!
//! The drill runs in a terminal, so logs go either to stderr or, when a log
//! directory is configured, to daily rolling files.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::Environment;

/// Initialize tracing/logging based on the environment
///
/// # Development Mode
/// - Pretty-printed, human-readable logs
/// - Default level: DEBUG (WARN when sharing the terminal through stderr)
/// - Shows file locations and line numbers
///
/// # Production Mode
/// - JSON-formatted structured logs
/// - Default level: INFO (WARN on stderr)
///
/// # Environment Variables
/// - `RUST_LOG`: Override default log level (e.g., `RUST_LOG=md_app=trace`)
///
/// The returned guard flushes file logs on drop; keep it alive for the
/// lifetime of the program.
pub fn init_tracing(env: &Environment, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let (writer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "drill.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };
    let to_file = guard.is_some();
    let filter = default_filter(env, to_file);

    if env.is_development() {
        init_development_tracing(writer, filter, !to_file);
    } else {
        init_production_tracing(writer, filter);
    }

    guard
}

/// Filter used when `RUST_LOG` is unset. Stderr shares the terminal with the
/// screens, so it only gets warnings.
const fn default_filter(env: &Environment, to_file: bool) -> &'static str {
    match (env, to_file) {
        (_, false) => "warn",
        (Environment::Development, true) => "debug",
        (Environment::Production, true) => "info",
    }
}

/// Initialize development-friendly tracing with pretty output
fn init_development_tracing(writer: BoxMakeWriter, default_filter: &str, ansi: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(ansi)
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .pretty()
                .with_filter(env_filter),
        )
        .init();

    tracing::info!("Tracing initialized in development mode");
}

/// Initialize production tracing with JSON output
fn init_production_tracing(writer: BoxMakeWriter, default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .flatten_event(true)
                .with_target(true)
                .with_filter(env_filter),
        )
        .init();

    tracing::info!("Tracing initialized in production mode");
}
