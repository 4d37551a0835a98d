//! Principal component contour method
//!
//! The record is rotated onto its principal axes; the first component is
//! fitted with an inverse Gaussian distribution and the second is modelled
//! conditionally on the first through binned mean and spread functions
//! (linear mean, quadratic spread). Contours come from the inverse-FORM
//! transform of the beta circle through that model.

use tracing::debug;

use super::{finish_contour, trace, validate_record, ContourMethod, ReturnPeriod};
use crate::models::{Buoy, Contour};
use crate::stats::{covariance, fit_poly, mean, norm_cdf, std_dev, InverseGaussianFit, PolyFit};
use crate::utils::errors::{Result, SeastateError};

/// Offset keeping the shifted second component strictly positive
const COMPONENT_SHIFT_MARGIN: f64 = 0.1;

/// Minimum bins for the conditional mean/spread fits
const MIN_BINS: usize = 3;

/// PCA based environmental contour method
#[derive(Debug, Clone)]
pub struct PcaContourMethod {
    station_id: String,
    /// Principal direction rows: component_i = coeff[i][0]*hs + coeff[i][1]*te
    coeff: [[f64; 2]; 2],
    shift: f64,
    comp1: InverseGaussianFit,
    mu_fit: PolyFit,
    sigma_fit: PolyFit,
}

impl PcaContourMethod {
    /// Fit the PCA model on a buoy record
    pub fn fit(buoy: &Buoy, bin_size: usize) -> Result<Self> {
        validate_record(buoy)?;

        let hs = buoy.hs();
        let te = buoy.te();
        let coeff = principal_directions(&hs, &te)?;

        let comp1: Vec<f64> = hs
            .iter()
            .zip(&te)
            .map(|(&h, &t)| coeff[0][0] * h + coeff[0][1] * t)
            .collect();
        let comp2_raw: Vec<f64> = hs
            .iter()
            .zip(&te)
            .map(|(&h, &t)| coeff[1][0] * h + coeff[1][1] * t)
            .collect();

        let min2 = comp2_raw.iter().copied().fold(f64::INFINITY, f64::min);
        let shift = min2.abs() + COMPONENT_SHIFT_MARGIN;
        let comp2: Vec<f64> = comp2_raw.iter().map(|&c| c + shift).collect();

        let comp1_fit = InverseGaussianFit::fit(&comp1)?;

        // Conditional model of the second component binned along the first
        let mut order: Vec<usize> = (0..comp1.len()).collect();
        order.sort_by(|&a, &b| comp1[a].total_cmp(&comp1[b]));

        let n_bins = comp1.len() / bin_size;
        if n_bins < MIN_BINS {
            return Err(SeastateError::InsufficientData(format!(
                "PCA conditional fit needs at least {} bins of {} points, record has {}",
                MIN_BINS,
                bin_size,
                comp1.len()
            )));
        }

        let mut centers = Vec::with_capacity(n_bins);
        let mut means = Vec::with_capacity(n_bins);
        let mut spreads = Vec::with_capacity(n_bins);
        for b in 0..n_bins {
            let start = b * bin_size;
            // last bin absorbs the remainder
            let end = if b == n_bins - 1 { comp1.len() } else { start + bin_size };
            let c1_bin: Vec<f64> = order[start..end].iter().map(|&i| comp1[i]).collect();
            let c2_bin: Vec<f64> = order[start..end].iter().map(|&i| comp2[i]).collect();
            centers.push(mean(&c1_bin));
            means.push(mean(&c2_bin));
            spreads.push(std_dev(&c2_bin));
        }

        let mu_fit = fit_poly(&centers, &means, 1)?;
        let sigma_fit = fit_poly(&centers, &spreads, 2)?;

        debug!(
            station = %buoy.station_id,
            bins = n_bins,
            comp1_mu = comp1_fit.mu,
            comp1_lambda = comp1_fit.lambda,
            "PCA model fitted"
        );
        crate::utils::logging::log_method_fit(&buoy.station_id, "pca", buoy.len());

        Ok(Self {
            station_id: buoy.station_id.clone(),
            coeff,
            shift,
            comp1: comp1_fit,
            mu_fit,
            sigma_fit,
        })
    }

    /// Map standard normal coordinates to principal components
    pub(crate) fn components_for(&self, u1: f64, u2: f64) -> Result<(f64, f64)> {
        let c1 = self.comp1.quantile(norm_cdf(u1)?)?;
        let mu = self.mu_fit.eval(c1);
        let sigma = self.sigma_fit.eval(c1).max(0.0);
        Ok((c1, mu + u2 * sigma))
    }

    /// Trace the full angle grid without filtering
    ///
    /// Unlike [`ContourMethod::contour`] this keeps every angle, including
    /// unphysical lower-branch points, so per-angle alignment survives for
    /// the bootstrap envelope.
    pub(crate) fn trace_raw(&self, beta: f64, n_angles: usize) -> Result<Vec<(f64, f64)>> {
        let mut points = Vec::with_capacity(n_angles);
        for i in 0..n_angles {
            let theta = std::f64::consts::TAU * i as f64 / n_angles as f64;
            let (c1, c2) = self.components_for(beta * theta.cos(), beta * theta.sin())?;
            points.push(self.invert(c1, c2));
        }
        Ok(points)
    }

    /// Rotate principal components back into (Te, Hs)
    pub(crate) fn invert(&self, c1: f64, c2_shifted: f64) -> (f64, f64) {
        let c2 = c2_shifted - self.shift;
        let [[a, b], [c, d]] = self.coeff;
        let det = a * d - b * c;
        let hs = (c1 * d - b * c2) / det;
        let te = (a * c2 - c * c1) / det;
        (te, hs)
    }
}

impl ContourMethod for PcaContourMethod {
    fn name(&self) -> &'static str {
        "pca"
    }

    fn station_id(&self) -> &str {
        &self.station_id
    }

    fn contour(&self, rp: &ReturnPeriod, n_angles: usize) -> Result<Contour> {
        let beta = rp.reliability_index()?;
        let points = trace(beta, n_angles, |u1, u2| {
            let (c1, c2) = self.components_for(u1, u2)?;
            Ok(self.invert(c1, c2))
        })?;
        Ok(finish_contour(self.name(), &self.station_id, rp, points))
    }
}

/// Principal directions of the (hs, te) covariance, largest variance first
///
/// Component signs follow the magnitude convention: all loadings positive
/// except the second component's te loading, so the first component grows
/// with both variables and stays positive for positive data.
fn principal_directions(hs: &[f64], te: &[f64]) -> Result<[[f64; 2]; 2]> {
    let var_h = crate::stats::variance(hs);
    let var_t = crate::stats::variance(te);
    let cov = covariance(hs, te)?;
    if !var_h.is_finite() || !var_t.is_finite() || var_h <= 0.0 || var_t <= 0.0 {
        return Err(SeastateError::FitFailed(
            "PCA requires dispersion in both hs and te".to_string(),
        ));
    }

    let trace_half = 0.5 * (var_h + var_t);
    let delta = (0.25 * (var_h - var_t).powi(2) + cov * cov).sqrt();
    let lambda1 = trace_half + delta;

    let v1 = if cov.abs() > 1e-12 {
        normalize([lambda1 - var_t, cov])
    } else if var_h >= var_t {
        [1.0, 0.0]
    } else {
        [0.0, 1.0]
    };
    let v2 = [-v1[1], v1[0]];

    Ok([
        [v1[0].abs(), v1[1].abs()],
        [v2[0].abs(), -v2[1].abs()],
    ])
}

fn normalize(v: [f64; 2]) -> [f64; 2] {
    let norm = (v[0] * v[0] + v[1] * v[1]).sqrt();
    [v[0] / norm, v[1] / norm]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contours::testutil::synthetic_buoy;

    #[test]
    fn test_principal_directions_follow_correlation() {
        let buoy = synthetic_buoy(2000);
        let coeff = principal_directions(&buoy.hs(), &buoy.te()).unwrap();
        // first component loads positively on both variables
        assert!(coeff[0][0] > 0.0 && coeff[0][1] > 0.0);
        // rows are unit length
        for row in coeff {
            let norm = (row[0] * row[0] + row[1] * row[1]).sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_fit_and_contour() {
        let buoy = synthetic_buoy(3000);
        let pca = PcaContourMethod::fit(&buoy, 250).unwrap();
        let rp = ReturnPeriod::new(100.0, 1.0).unwrap();
        let contour = pca.contour(&rp, 100).unwrap();

        assert_eq!(contour.method, "pca");
        assert!(!contour.points.is_empty());
        assert!(contour.points.iter().all(|p| p.hs.is_finite() && p.te.is_finite()));

        // the 100-year contour reaches beyond the bulk of the record
        let max_obs = buoy.hs().into_iter().fold(f64::NEG_INFINITY, f64::max);
        let max_contour = contour.max_hs().unwrap();
        assert!(max_contour > 0.5 * max_obs);
        assert!(max_contour < 10.0 * max_obs);
    }

    #[test]
    fn test_invert_round_trips_components() {
        let buoy = synthetic_buoy(2000);
        let pca = PcaContourMethod::fit(&buoy, 200).unwrap();
        let (te, hs) = pca.invert(5.0, 3.0);
        let c1 = pca.coeff[0][0] * hs + pca.coeff[0][1] * te;
        let c2 = pca.coeff[1][0] * hs + pca.coeff[1][1] * te + pca.shift;
        assert!((c1 - 5.0).abs() < 1e-9);
        assert!((c2 - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_rejects_short_record() {
        let buoy = synthetic_buoy(50);
        assert!(PcaContourMethod::fit(&buoy, 10).is_err());
    }
}
