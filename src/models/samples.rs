//! Long-term analysis sample models

use serde::{Deserialize, Serialize};

/// A weighted sea state sample for full sea state long-term analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Energy period Te (s)
    pub te: f64,
    /// Significant wave height Hs (m)
    pub hs: f64,
    /// Probability weight of the sample within its band
    pub weight: f64,
}

/// A set of samples drawn between return-level contours
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleSet {
    pub station_id: String,
    pub seed: u64,
    /// Return periods in years bounding the sampling bands, ascending
    pub band_return_periods: Vec<f64>,
    pub samples: Vec<Sample>,
}

impl SampleSet {
    /// Total probability weight across all samples
    pub fn total_weight(&self) -> f64 {
        self.samples.iter().map(|s| s.weight).sum()
    }
}
