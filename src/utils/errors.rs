//! Error handling for seastate
//!
//! This module defines the main error types used throughout the toolkit
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the seastate toolkit
#[derive(Error, Debug)]
pub enum SeastateError {
    #[error("NDBC archive error: {0}")]
    Ndbc(#[from] NdbcError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Malformed data table: {0}")]
    MalformedTable(String),

    #[error("Empty measurement record for station {station}")]
    EmptyRecord { station: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Distribution fit failed: {0}")]
    FitFailed(String),

    #[error("Numerical error: {0}")]
    Numerical(String),

    #[error("Water depth unavailable for station {station}")]
    DepthUnavailable { station: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// NDBC data source specific errors
#[derive(Error, Debug)]
pub enum NdbcError {
    #[error("NDBC request failed: {0}")]
    RequestFailed(String),

    #[error("NDBC request timeout")]
    Timeout,

    #[error("Invalid NDBC response: {0}")]
    InvalidResponse(String),

    #[error("NDBC service unavailable")]
    ServiceUnavailable,

    #[error("No spectral data files listed for station {station}")]
    NoDataFiles { station: String },
}

/// Result type alias for seastate operations
pub type Result<T> = std::result::Result<T, SeastateError>;

/// Result type alias for NDBC operations
pub type NdbcResult<T> = std::result::Result<T, NdbcError>;

impl SeastateError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            SeastateError::Ndbc(_) => true,
            SeastateError::Config(_) => false,
            SeastateError::Http(_) => true,
            SeastateError::Serialization(_) => false,
            SeastateError::Io(_) => true,
            SeastateError::UrlParse(_) => false,
            SeastateError::Regex(_) => false,
            SeastateError::MalformedTable(_) => false,
            SeastateError::EmptyRecord { .. } => false,
            SeastateError::InsufficientData(_) => false,
            SeastateError::FitFailed(_) => false,
            SeastateError::Numerical(_) => false,
            SeastateError::DepthUnavailable { .. } => true,
            SeastateError::InvalidInput(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SeastateError::Config(_) => ErrorSeverity::Critical,
            SeastateError::EmptyRecord { .. } => ErrorSeverity::Critical,
            SeastateError::Ndbc(_) => ErrorSeverity::Warning,
            SeastateError::Http(_) => ErrorSeverity::Warning,
            SeastateError::DepthUnavailable { .. } => ErrorSeverity::Warning,
            SeastateError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
