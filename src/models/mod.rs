//! Data models for the seastate toolkit

pub mod buoy;
pub mod contour;
pub mod samples;
pub mod sea_state;
pub mod station;

pub use buoy::{Buoy, DataSource};
pub use contour::{Contour, ContourInterval, ContourPoint};
pub use samples::{Sample, SampleSet};
pub use sea_state::SeaState;
pub use station::StationMetadata;
