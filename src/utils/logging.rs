//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the seastate toolkit.

use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
///
/// Returns the worker guard for the file appender; the caller must keep it
/// alive for the lifetime of the process or buffered log lines are lost.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "seastate.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a completed station data fetch
pub fn log_fetch_result(station: &str, records: usize, skipped_years: usize) {
    if skipped_years > 0 {
        warn!(
            station = station,
            records = records,
            skipped_years = skipped_years,
            "Station archive fetched with missing years"
        );
    } else {
        info!(
            station = station,
            records = records,
            "Station archive fetched"
        );
    }
}

/// Log a contour method fit
pub fn log_method_fit(station: &str, method: &str, records: usize) {
    debug!(
        station = station,
        method = method,
        records = records,
        "Contour method fitted"
    );
}

/// Log a computed contour
pub fn log_contour(station: &str, method: &str, return_period_years: f64, points: usize) {
    info!(
        station = station,
        method = method,
        return_period_years = return_period_years,
        points = points,
        "Return contour computed"
    );
}

/// Log an exported result file
pub fn log_export(kind: &str, path: &str) {
    info!(kind = kind, path = path, "Result exported");
}
