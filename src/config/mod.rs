//! Configuration module
//!
//! This module handles application configuration loading and validation.

pub mod settings;
pub mod validation;

pub use settings::{
    AnalysisConfig, BootstrapConfig, CacheConfig, FetchConfig, LoggingConfig, OutputConfig,
    SamplingConfig, Settings, StationConfig, SteepnessConfig,
};
