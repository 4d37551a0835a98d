//! Services module
//!
//! This module contains the data acquisition and persistence services.

pub mod archive;
pub mod ndbc;
pub mod spectra;

pub use archive::ArchiveService;
pub use ndbc::NdbcClient;
pub use spectra::{parse_spectral_table, ParsedSpectra};
