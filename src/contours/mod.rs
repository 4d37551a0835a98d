//! Return-period contour methods
//!
//! Every method shares the same inverse-FORM machinery: a return period maps
//! to an exceedance probability and a reliability index `beta`, the contour is
//! traced along the beta circle in standard normal space, and each method
//! supplies the transform from normal coordinates back to (Te, Hs).

pub mod bootstrap;
pub mod copula;
pub mod nonparametric;
pub mod pca;
pub mod rosenblatt;
pub mod sampling;

pub use bootstrap::bootstrap_pca_contour;
pub use copula::{CopulaContourMethod, CopulaFamily};
pub use nonparametric::NonParametricCopulaMethod;
pub use pca::PcaContourMethod;
pub use rosenblatt::RosenblattMethod;
pub use sampling::contour_points_at;

use tracing::warn;

use crate::models::{Buoy, Contour, ContourPoint};
use crate::stats::norm_quantile;
use crate::utils::errors::{Result, SeastateError};

/// Hours in an average year
pub const HOURS_PER_YEAR: f64 = 365.25 * 24.0;

/// Minimum observations any contour method will fit on
pub const MIN_RECORDS: usize = 100;

/// A return period together with the sea state duration it is counted in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnPeriod {
    pub years: f64,
    pub sea_state_duration_hours: f64,
}

impl ReturnPeriod {
    pub fn new(years: f64, sea_state_duration_hours: f64) -> Result<Self> {
        if years <= 0.0 || sea_state_duration_hours <= 0.0 {
            return Err(SeastateError::InvalidInput(
                "return period and sea state duration must be positive".to_string(),
            ));
        }
        Ok(Self {
            years,
            sea_state_duration_hours,
        })
    }

    /// Probability that a single sea state exceeds the return level
    pub fn exceedance_probability(&self) -> f64 {
        self.sea_state_duration_hours / (self.years * HOURS_PER_YEAR)
    }

    /// Reliability index: radius of the contour circle in normal space
    pub fn reliability_index(&self) -> Result<f64> {
        let p = self.exceedance_probability();
        if p >= 1.0 {
            return Err(SeastateError::InvalidInput(format!(
                "return period of {} years is shorter than one sea state",
                self.years
            )));
        }
        norm_quantile(1.0 - p)
    }
}

/// An environmental contour estimation method fitted to a buoy record
pub trait ContourMethod {
    /// Stable method identifier used in file names and exports
    fn name(&self) -> &'static str;

    fn station_id(&self) -> &str;

    /// Trace the return contour over `n_angles` points of the beta circle
    fn contour(&self, rp: &ReturnPeriod, n_angles: usize) -> Result<Contour>;
}

/// Validate a record before fitting and warn on thin extrapolation bases
pub(crate) fn validate_record(buoy: &Buoy) -> Result<()> {
    if buoy.len() < MIN_RECORDS {
        return Err(SeastateError::InsufficientData(format!(
            "contour fit requires at least {} sea states, station {} has {}",
            MIN_RECORDS,
            buoy.station_id,
            buoy.len()
        )));
    }
    Ok(())
}

/// Warn when a return period extrapolates far beyond the record span
pub fn check_extrapolation(buoy: &Buoy, rp: &ReturnPeriod) {
    if let Some(span) = buoy.time_span_years() {
        if rp.years > 1000.0 * span {
            warn!(
                station = %buoy.station_id,
                record_years = span,
                return_period_years = rp.years,
                "Return period extrapolates far beyond the measurement record"
            );
        }
    }
}

/// Trace a contour by evaluating `transform` at every angle of the beta
/// circle
///
/// Unphysical points (non-finite or non-positive in either coordinate) are
/// dropped; the PCA rotation can push the lower branch below zero height.
pub(crate) fn trace<F>(beta: f64, n_angles: usize, mut transform: F) -> Result<Vec<ContourPoint>>
where
    F: FnMut(f64, f64) -> Result<(f64, f64)>,
{
    if n_angles < 8 {
        return Err(SeastateError::InvalidInput(
            "a contour needs at least 8 angles".to_string(),
        ));
    }

    let mut points = Vec::with_capacity(n_angles);
    for i in 0..n_angles {
        let theta = std::f64::consts::TAU * i as f64 / n_angles as f64;
        let u1 = beta * theta.cos();
        let u2 = beta * theta.sin();
        let (te, hs) = transform(u1, u2)?;
        if te.is_finite() && hs.is_finite() && te > 0.0 && hs > 0.0 {
            points.push(ContourPoint { te, hs });
        }
    }

    if points.is_empty() {
        return Err(SeastateError::Numerical(
            "contour transform produced no physical points".to_string(),
        ));
    }
    Ok(points)
}

/// Assemble the contour model and log it
pub(crate) fn finish_contour(
    method: &str,
    station_id: &str,
    rp: &ReturnPeriod,
    points: Vec<ContourPoint>,
) -> Contour {
    crate::utils::logging::log_contour(station_id, method, rp.years, points.len());
    Contour {
        method: method.to_string(),
        station_id: station_id.to_string(),
        return_period_years: rp.years,
        sea_state_duration_hours: rp.sea_state_duration_hours,
        points,
    }
}
