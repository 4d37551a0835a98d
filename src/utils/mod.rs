//! Utility modules
//!
//! This module contains error handling, logging, and helper utilities.

pub mod errors;
pub mod helpers;
pub mod logging;

pub use errors::{ErrorSeverity, NdbcError, Result, SeastateError};
