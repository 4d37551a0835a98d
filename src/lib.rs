//! Seastate
//!
//! An extreme sea state contour analysis toolkit for ocean wave measurement
//! data. This library fetches and caches buoy wave records, fits several
//! statistical contour estimation methods (PCA, parametric and
//! non-parametric copulas, Rosenblatt transform), computes return-period
//! contours with optional bootstrap confidence intervals, draws weighted
//! samples for long-term load analysis and applies a wave-breaking steepness
//! correction.

pub mod config;
pub mod contours;
pub mod models;
pub mod services;
pub mod stats;
pub mod utils;
pub mod waves;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{Result, SeastateError};

// Re-export main components for easy access
pub use contours::{
    ContourMethod, CopulaContourMethod, CopulaFamily, NonParametricCopulaMethod,
    PcaContourMethod, ReturnPeriod, RosenblattMethod,
};
pub use models::{Buoy, Contour, SampleSet, SeaState};
pub use services::{ArchiveService, NdbcClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
