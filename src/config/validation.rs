//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{Result, SeastateError};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_station_config(&settings.station)?;
    validate_fetch_config(&settings.fetch)?;
    validate_cache_config(&settings.cache)?;
    validate_analysis_config(&settings.analysis)?;
    validate_output_config(&settings.output)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate station configuration
fn validate_station_config(config: &super::StationConfig) -> Result<()> {
    if config.id.is_empty() {
        return Err(SeastateError::Config(
            "Station id is required".to_string(),
        ));
    }

    if !config.id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(SeastateError::Config(format!(
            "Station id must be alphanumeric: {}",
            config.id
        )));
    }

    Ok(())
}

/// Validate fetch configuration
fn validate_fetch_config(config: &super::FetchConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(SeastateError::Config(
            "Fetch base URL is required".to_string(),
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(SeastateError::Config(
            "Fetch timeout must be greater than 0".to_string(),
        ));
    }

    if config.max_concurrent_downloads == 0 {
        return Err(SeastateError::Config(
            "Max concurrent downloads must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate cache configuration
fn validate_cache_config(config: &super::CacheConfig) -> Result<()> {
    if config.directory.is_empty() {
        return Err(SeastateError::Config(
            "Cache directory is required".to_string(),
        ));
    }

    Ok(())
}

/// Validate analysis configuration
fn validate_analysis_config(config: &super::AnalysisConfig) -> Result<()> {
    if config.sea_state_duration_hours <= 0.0 {
        return Err(SeastateError::Config(
            "Sea state duration must be greater than 0".to_string(),
        ));
    }

    if config.return_period_years <= 0.0 {
        return Err(SeastateError::Config(
            "Return period must be greater than 0".to_string(),
        ));
    }

    if config.n_angles < 8 {
        return Err(SeastateError::Config(
            "At least 8 contour angles are required".to_string(),
        ));
    }

    if config.pca_bin_size < 10 || config.copula_bin_size < 10 {
        return Err(SeastateError::Config(
            "Bin sizes below 10 points cannot support a stable fit".to_string(),
        ));
    }

    validate_sampling_config(&config.sampling)?;
    validate_steepness_config(&config.steepness)?;
    validate_bootstrap_config(&config.bootstrap)?;

    Ok(())
}

/// Validate sampling configuration
fn validate_sampling_config(config: &super::SamplingConfig) -> Result<()> {
    if config.points_per_band == 0 {
        return Err(SeastateError::Config(
            "Sampling points per band must be greater than 0".to_string(),
        ));
    }

    if config.band_return_periods.len() < 2 {
        return Err(SeastateError::Config(
            "At least two band return periods are required".to_string(),
        ));
    }

    if config.band_return_periods.iter().any(|&rp| rp <= 0.0) {
        return Err(SeastateError::Config(
            "Band return periods must all be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate steepness configuration
fn validate_steepness_config(config: &super::SteepnessConfig) -> Result<()> {
    if config.max_steepness <= 0.0 || config.max_steepness >= 1.0 {
        return Err(SeastateError::Config(format!(
            "Breaking steepness must lie in (0, 1): {}",
            config.max_steepness
        )));
    }

    if let Some(depth) = config.depth {
        if depth <= 0.0 {
            return Err(SeastateError::Config(
                "Water depth must be greater than 0".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validate bootstrap configuration
fn validate_bootstrap_config(config: &super::BootstrapConfig) -> Result<()> {
    if config.enabled {
        if config.resamples < 10 {
            return Err(SeastateError::Config(
                "Bootstrap requires at least 10 resamples".to_string(),
            ));
        }

        if config.confidence <= 0.0 || config.confidence >= 1.0 {
            return Err(SeastateError::Config(
                "Bootstrap confidence must lie in (0, 1)".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validate output configuration
fn validate_output_config(config: &super::OutputConfig) -> Result<()> {
    if config.directory.is_empty() {
        return Err(SeastateError::Config(
            "Output directory is required".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(SeastateError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(SeastateError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_station() {
        let mut settings = Settings::default();
        settings.station.id = String::new();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_steepness() {
        let mut settings = Settings::default();
        settings.analysis.steepness.max_steepness = 1.5;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_single_band() {
        let mut settings = Settings::default();
        settings.analysis.sampling.band_return_periods = vec![100.0];
        assert!(settings.validate().is_err());
    }
}
