//! Station metadata model

use serde::{Deserialize, Serialize};

/// Metadata scraped from the NDBC station page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationMetadata {
    /// Water depth at the measurement point (m)
    pub water_depth_m: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Human readable station label
    pub label: Option<String>,
}
