//! Sample generation for long-term load analysis
//!
//! Full sea state sampling draws weighted states between consecutive
//! return-level circles of the fitted PCA model; the weight of each sample is
//! the probability mass of its annular band split evenly across the band's
//! samples. Contour-approach analysis instead picks states straight off the
//! contour at chosen energy periods.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::pca::PcaContourMethod;
use super::{ContourMethod, ReturnPeriod};
use crate::models::{Contour, ContourPoint, Sample, SampleSet};
use crate::utils::errors::{Result, SeastateError};
use crate::utils::helpers::lerp;

impl PcaContourMethod {
    /// Draw weighted full sea state samples between return-level bands
    ///
    /// `band_return_periods` are return periods in years; consecutive pairs
    /// bound the annular sampling bands in normal space. Deterministic for a
    /// fixed seed.
    pub fn full_sea_state_samples(
        &self,
        points_per_band: usize,
        band_return_periods: &[f64],
        sea_state_duration_hours: f64,
        seed: u64,
    ) -> Result<SampleSet> {
        if points_per_band == 0 {
            return Err(SeastateError::InvalidInput(
                "points_per_band must be greater than 0".to_string(),
            ));
        }
        if band_return_periods.len() < 2 {
            return Err(SeastateError::InvalidInput(
                "sampling requires at least two band return periods".to_string(),
            ));
        }

        let mut years = band_return_periods.to_vec();
        years.sort_by(|a, b| a.total_cmp(b));

        let mut betas = Vec::with_capacity(years.len());
        for &year in &years {
            let rp = ReturnPeriod::new(year, sea_state_duration_hours)?;
            let beta = rp.reliability_index()?;
            if beta <= 0.0 {
                return Err(SeastateError::InvalidInput(format!(
                    "band return period of {} years is too short to bound a sampling band",
                    year
                )));
            }
            betas.push(beta);
        }
        if betas.windows(2).any(|w| w[0] >= w[1]) {
            return Err(SeastateError::InvalidInput(
                "band return periods must be strictly increasing".to_string(),
            ));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut samples = Vec::with_capacity(points_per_band * (betas.len() - 1));
        let mut dropped = 0usize;

        for pair in betas.windows(2) {
            let (beta_lo, beta_hi) = (pair[0], pair[1]);
            // radial mass of the band under the 2-D standard normal
            let mass = (-0.5 * beta_lo * beta_lo).exp() - (-0.5 * beta_hi * beta_hi).exp();
            let weight = mass / points_per_band as f64;

            for _ in 0..points_per_band {
                let theta = rng.gen_range(0.0..std::f64::consts::TAU);
                let radius = rng.gen_range(beta_lo..beta_hi);
                let u1 = radius * theta.cos();
                let u2 = radius * theta.sin();

                let (c1, c2) = self.components_for(u1, u2)?;
                let (te, hs) = self.invert(c1, c2);
                if te.is_finite() && hs.is_finite() && hs > 0.0 && te > 0.0 {
                    samples.push(Sample { te, hs, weight });
                } else {
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            debug!(dropped = dropped, "Dropped unphysical samples");
        }
        info!(
            station = %self.station_id(),
            samples = samples.len(),
            bands = betas.len() - 1,
            "Full sea state samples generated"
        );

        Ok(SampleSet {
            station_id: self.station_id().to_string(),
            seed,
            band_return_periods: years,
            samples,
        })
    }
}

/// Interpolate contour points at the requested energy periods
///
/// Follows the upper branch: where several contour segments span a period,
/// the largest interpolated hs wins. Periods outside the contour's te span
/// yield no point.
pub fn contour_points_at(contour: &Contour, te_values: &[f64]) -> Vec<ContourPoint> {
    let mut points = Vec::new();
    for &t in te_values {
        let mut best: Option<f64> = None;
        for pair in contour.points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (lo, hi) = if a.te <= b.te { (a.te, b.te) } else { (b.te, a.te) };
            if t < lo || t > hi {
                continue;
            }
            let hs = lerp(a.te, a.hs, b.te, b.hs, t);
            if best.map_or(true, |current| hs > current) {
                best = Some(hs);
            }
        }
        if let Some(hs) = best {
            points.push(ContourPoint { te: t, hs });
        }
    }
    points
}
