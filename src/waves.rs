//! Linear wave mechanics
//!
//! Wavelength from the finite-depth dispersion relation and the breaking
//! steepness cap applied to return contours.

use tracing::{debug, info};

use crate::models::Contour;
use crate::utils::errors::{Result, SeastateError};

/// Standard gravity (m/s^2)
pub const GRAVITY_M_S2: f64 = 9.81;

/// A contour with the steepness cap applied
#[derive(Debug, Clone)]
pub struct SteepnessCorrection {
    pub contour: Contour,
    /// Indices of the contour points whose hs was capped
    pub capped_indices: Vec<usize>,
}

/// Wave number from the dispersion relation `w^2 = g k tanh(k d)`
///
/// Newton iteration from the deep-water start `k0 = w^2 / g`.
pub fn wavenumber(period_s: f64, depth_m: f64) -> Result<f64> {
    if period_s <= 0.0 || depth_m <= 0.0 {
        return Err(SeastateError::InvalidInput(format!(
            "wavenumber needs positive period and depth, got T = {}, d = {}",
            period_s, depth_m
        )));
    }

    let omega = std::f64::consts::TAU / period_s;
    let omega_sq = omega * omega;
    let mut k = omega_sq / GRAVITY_M_S2;

    for _ in 0..100 {
        let kd = k * depth_m;
        let tanh = kd.tanh();
        let f = GRAVITY_M_S2 * k * tanh - omega_sq;
        let sech_sq = 1.0 - tanh * tanh;
        let df = GRAVITY_M_S2 * (tanh + kd * sech_sq);
        let step = f / df;
        k -= step;
        if !k.is_finite() || k <= 0.0 {
            return Err(SeastateError::Numerical(format!(
                "dispersion iteration diverged for T = {}, d = {}",
                period_s, depth_m
            )));
        }
        if (step / k).abs() < 1e-12 {
            return Ok(k);
        }
    }

    Err(SeastateError::Numerical(format!(
        "dispersion iteration did not converge for T = {}, d = {}",
        period_s, depth_m
    )))
}

/// Wavelength at the given period and depth
pub fn wavelength(period_s: f64, depth_m: f64) -> Result<f64> {
    Ok(std::f64::consts::TAU / wavenumber(period_s, depth_m)?)
}

/// Limiting breaking heights `H = s_max * L(T, d)` for each period
pub fn limit_heights(max_steepness: f64, periods_s: &[f64], depth_m: f64) -> Result<Vec<f64>> {
    if !(0.0..1.0).contains(&max_steepness) || max_steepness == 0.0 {
        return Err(SeastateError::InvalidInput(format!(
            "breaking steepness must lie in (0, 1), got {}",
            max_steepness
        )));
    }
    periods_s
        .iter()
        .map(|&t| Ok(max_steepness * wavelength(t, depth_m)?))
        .collect()
}

/// Cap contour heights at the breaking steepness limit
///
/// Returns a corrected copy (method suffixed with `-steepness`) and the
/// indices that were capped.
pub fn apply_steepness_correction(
    contour: &Contour,
    max_steepness: f64,
    depth_m: f64,
) -> Result<SteepnessCorrection> {
    let limits = limit_heights(max_steepness, &contour.te_values(), depth_m)?;

    let mut corrected = contour.clone();
    corrected.method = format!("{}-steepness", contour.method);
    let mut capped_indices = Vec::new();
    for (i, (point, &limit)) in corrected.points.iter_mut().zip(&limits).enumerate() {
        if point.hs > limit {
            debug!(
                index = i,
                te = point.te,
                hs = point.hs,
                limit = limit,
                "Capping contour point at breaking limit"
            );
            point.hs = limit;
            capped_indices.push(i);
        }
    }

    info!(
        method = %contour.method,
        capped = capped_indices.len(),
        total = contour.points.len(),
        depth_m = depth_m,
        "Steepness correction applied"
    );

    Ok(SteepnessCorrection {
        contour: corrected,
        capped_indices,
    })
}
