//! Shared test infrastructure
//!
//! Mock NDBC server, deterministic synthetic records and init-once setup for
//! the integration tests.

pub mod ndbc_mock;
pub mod series;

use std::sync::Once;

pub use ndbc_mock::NdbcMockServer;
pub use series::synthetic_buoy;

static INIT: Once = Once::new();

/// Initialize the test environment once per process
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt::try_init();
    });
}

/// Settings pointing every path and URL at a temp directory and mock server
pub fn test_settings(base_url: &str, dir: &std::path::Path) -> seastate::Settings {
    let mut settings = seastate::Settings::default();
    settings.fetch.base_url = base_url.to_string();
    settings.cache.directory = dir.join("cache").display().to_string();
    settings.output.directory = dir.join("out").display().to_string();
    settings.logging.file_path = dir.join("logs").display().to_string();
    settings
}
