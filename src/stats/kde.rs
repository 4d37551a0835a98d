//! Gaussian kernel density estimation
//!
//! Non-parametric marginals for the non-parametric copula methods. The CDF is
//! the mean of the kernel CDFs at the sample points and the quantile inverts
//! it by bisection over the padded data range.

use statrs::distribution::{Continuous, ContinuousCDF};

use super::descriptive::{iqr, std_dev};
use super::fits::{clamp_probability, standard_normal};
use crate::utils::errors::{Result, SeastateError};

const MIN_KDE_POINTS: usize = 10;

/// Univariate Gaussian kernel density estimate with Silverman bandwidth
#[derive(Debug, Clone)]
pub struct GaussianKde {
    data: Vec<f64>,
    bandwidth: f64,
    min: f64,
    max: f64,
}

impl GaussianKde {
    pub fn fit(data: &[f64]) -> Result<Self> {
        if data.len() < MIN_KDE_POINTS {
            return Err(SeastateError::InsufficientData(format!(
                "KDE requires at least {} points, got {}",
                MIN_KDE_POINTS,
                data.len()
            )));
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(SeastateError::InvalidInput(
                "KDE requires finite data".to_string(),
            ));
        }

        let spread_std = std_dev(data);
        let spread_iqr = iqr(data)? / 1.34;
        let spread = if spread_iqr > 0.0 {
            spread_std.min(spread_iqr)
        } else {
            spread_std
        };
        if !spread.is_finite() || spread <= 0.0 {
            return Err(SeastateError::FitFailed(
                "KDE bandwidth is degenerate for constant data".to_string(),
            ));
        }
        let bandwidth = 0.9 * spread * (data.len() as f64).powf(-0.2);

        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            data: data.to_vec(),
            bandwidth,
            min,
            max,
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Estimated probability density at `x`
    pub fn density(&self, x: f64) -> Result<f64> {
        let normal = standard_normal()?;
        let sum: f64 = self
            .data
            .iter()
            .map(|&xi| normal.pdf((x - xi) / self.bandwidth))
            .sum();
        Ok(sum / (self.data.len() as f64 * self.bandwidth))
    }

    /// Estimated cumulative distribution at `x`
    pub fn cdf(&self, x: f64) -> Result<f64> {
        let normal = standard_normal()?;
        let sum: f64 = self
            .data
            .iter()
            .map(|&xi| normal.cdf((x - xi) / self.bandwidth))
            .sum();
        Ok(sum / self.data.len() as f64)
    }

    /// Quantile of the estimated distribution by bisection
    pub fn quantile(&self, p: f64) -> Result<f64> {
        let p = clamp_probability(p);

        // Pad the bracket well past the data so tail quantiles stay inside
        let pad = 10.0 * self.bandwidth;
        let mut lo = self.min - pad;
        let mut hi = self.max + pad;
        let mut expansions = 0;
        while self.cdf(hi)? < p {
            hi += pad;
            expansions += 1;
            if expansions > 200 {
                return Err(SeastateError::Numerical(
                    "KDE quantile bracket failed to expand".to_string(),
                ));
            }
        }
        while self.cdf(lo)? > p {
            lo -= pad;
            expansions += 1;
            if expansions > 200 {
                return Err(SeastateError::Numerical(
                    "KDE quantile bracket failed to expand".to_string(),
                ));
            }
        }

        for _ in 0..200 {
            let mid = 0.5 * (lo + hi);
            if self.cdf(mid)? < p {
                lo = mid;
            } else {
                hi = mid;
            }
            if hi - lo < 1e-9 * self.bandwidth.max(1e-6) {
                break;
            }
        }
        Ok(0.5 * (lo + hi))
    }
}
