//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub station: StationConfig,
    pub fetch: FetchConfig,
    pub cache: CacheConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Measurement station configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationConfig {
    /// NDBC station identifier, e.g. "46022"
    pub id: String,
}

/// NDBC archive fetch configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
    /// Concurrent yearly file downloads; kept low to stay polite
    pub max_concurrent_downloads: usize,
}

/// Local measurement cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    pub directory: String,
    /// Write the JSON snapshot after a fetch
    pub snapshot: bool,
    /// Write the plain text table after a fetch
    pub text: bool,
}

/// Extreme sea state analysis configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Sea state duration in hours
    pub sea_state_duration_hours: f64,
    /// Return period of interest in years
    pub return_period_years: f64,
    /// Number of angles traced along the contour circle
    pub n_angles: usize,
    /// Points per bin for the PCA conditional model
    pub pca_bin_size: usize,
    /// Points per bin for the copula conditional models
    pub copula_bin_size: usize,
    pub sampling: SamplingConfig,
    pub steepness: SteepnessConfig,
    pub bootstrap: BootstrapConfig,
}

/// Long-term analysis sample generation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SamplingConfig {
    /// Samples drawn per annular band between consecutive return levels
    pub points_per_band: usize,
    /// Return periods in years bounding the sampling bands
    pub band_return_periods: Vec<f64>,
    /// Energy periods at which contour-approach points are interpolated
    pub contour_approach_periods: Vec<f64>,
    pub seed: u64,
}

/// Wave-breaking steepness correction configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SteepnessConfig {
    /// Estimate of the limiting breaking steepness H/L
    pub max_steepness: f64,
    /// Water depth in metres; resolved from station metadata when absent
    pub depth: Option<f64>,
}

/// Bootstrap confidence interval configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BootstrapConfig {
    pub enabled: bool,
    pub resamples: usize,
    pub confidence: f64,
    pub seed: u64,
}

/// Result output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("SEASTATE"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::SeastateError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            station: StationConfig {
                id: "46022".to_string(),
            },
            fetch: FetchConfig {
                base_url: "https://www.ndbc.noaa.gov".to_string(),
                timeout_seconds: 30,
                user_agent: "seastate/0.1".to_string(),
                max_concurrent_downloads: 2,
            },
            cache: CacheConfig {
                directory: "data".to_string(),
                snapshot: true,
                text: true,
            },
            analysis: AnalysisConfig {
                sea_state_duration_hours: 1.0,
                return_period_years: 100.0,
                n_angles: 1000,
                pca_bin_size: 250,
                copula_bin_size: 40,
                sampling: SamplingConfig {
                    points_per_band: 20,
                    band_return_periods: vec![
                        0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0, 50.0, 100.0,
                    ],
                    contour_approach_periods: vec![12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0],
                    seed: 2,
                },
                steepness: SteepnessConfig {
                    max_steepness: 0.07,
                    depth: None,
                },
                bootstrap: BootstrapConfig {
                    enabled: false,
                    resamples: 1000,
                    confidence: 0.95,
                    seed: 0,
                },
            },
            output: OutputConfig {
                directory: "results".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "logs".to_string(),
            },
        }
    }
}
