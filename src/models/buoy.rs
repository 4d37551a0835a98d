//! Buoy measurement series model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::sea_state::SeaState;
use super::station::StationMetadata;

/// Origin of a measurement series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    Ndbc,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Ndbc => write!(f, "NDBC"),
        }
    }
}

/// A buoy station and its sea state measurement series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Buoy {
    pub station_id: String,
    pub source: DataSource,
    pub records: Vec<SeaState>,
    pub metadata: Option<StationMetadata>,
}

impl Buoy {
    pub fn new(station_id: impl Into<String>, source: DataSource) -> Self {
        Self {
            station_id: station_id.into(),
            source,
            records: Vec::new(),
            metadata: None,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Significant wave height column
    pub fn hs(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.hs).collect()
    }

    /// Energy period column
    pub fn te(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.te).collect()
    }

    /// Append records, dropping implausible rows, then sort by time and
    /// deduplicate timestamps keeping the first occurrence
    pub fn push_records(&mut self, records: impl IntoIterator<Item = SeaState>) {
        self.records
            .extend(records.into_iter().filter(SeaState::is_plausible));
        self.records.sort_by_key(|r| r.time);
        self.records.dedup_by_key(|r| r.time);
    }

    /// Span of the record in years, if at least two observations exist
    pub fn time_span_years(&self) -> Option<f64> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        let seconds = (last.time - first.time).num_seconds();
        if seconds <= 0 {
            return None;
        }
        Some(seconds as f64 / (365.25 * 24.0 * 3600.0))
    }
}
