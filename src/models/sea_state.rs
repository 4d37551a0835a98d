//! Sea state observation model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single hourly sea state derived from a wave spectrum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeaState {
    /// Observation time (UTC)
    pub time: DateTime<Utc>,
    /// Significant wave height Hs (m)
    pub hs: f64,
    /// Energy period Te (s)
    pub te: f64,
}

impl SeaState {
    pub fn new(time: DateTime<Utc>, hs: f64, te: f64) -> Self {
        Self { time, hs, te }
    }

    /// A physically plausible observation has positive height and period
    pub fn is_plausible(&self) -> bool {
        self.hs.is_finite() && self.te.is_finite() && self.hs > 0.0 && self.te > 0.0
    }
}
