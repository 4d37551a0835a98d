//! Return contour models

use serde::{Deserialize, Serialize};

/// A single point on a return contour in (Te, Hs) space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContourPoint {
    /// Energy period Te (s)
    pub te: f64,
    /// Significant wave height Hs (m)
    pub hs: f64,
}

/// A return-period contour traced by one estimation method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contour {
    /// Estimation method identifier, e.g. "pca" or "gumbel-copula"
    pub method: String,
    pub station_id: String,
    pub return_period_years: f64,
    pub sea_state_duration_hours: f64,
    pub points: Vec<ContourPoint>,
}

impl Contour {
    pub fn hs_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.hs).collect()
    }

    pub fn te_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.te).collect()
    }

    /// Largest significant wave height on the contour
    pub fn max_hs(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.hs)
            .max_by(|a, b| a.total_cmp(b))
    }
}

/// Per-angle percentile envelope of bootstrapped contours
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContourInterval {
    pub method: String,
    pub station_id: String,
    pub return_period_years: f64,
    pub confidence: f64,
    /// Replicates that produced a usable contour
    pub replicates_used: usize,
    pub lower: Vec<ContourPoint>,
    pub upper: Vec<ContourPoint>,
}
