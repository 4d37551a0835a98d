//! Parametric distribution fitting
//!
//! Maximum likelihood fits for the marginal and component distributions used
//! by the contour methods: lognormal, two-parameter Weibull and inverse
//! Gaussian. CDFs and quantiles delegate to `statrs` where it carries the
//! distribution; the inverse Gaussian is completed here on top of the normal
//! CDF.

use statrs::distribution::{ContinuousCDF, LogNormal, Normal, Weibull};
use tracing::debug;

use super::descriptive::{mean, std_dev};
use crate::utils::errors::{Result, SeastateError};

const MIN_FIT_POINTS: usize = 10;
const PROB_EPS: f64 = 1e-12;

/// Clamp a probability away from 0 and 1 before inversion
pub fn clamp_probability(p: f64) -> f64 {
    p.clamp(PROB_EPS, 1.0 - PROB_EPS)
}

fn require_positive(data: &[f64], what: &str) -> Result<()> {
    if data.len() < MIN_FIT_POINTS {
        return Err(SeastateError::InsufficientData(format!(
            "{} fit requires at least {} points, got {}",
            what,
            MIN_FIT_POINTS,
            data.len()
        )));
    }
    if data.iter().any(|&x| !x.is_finite() || x <= 0.0) {
        return Err(SeastateError::FitFailed(format!(
            "{} fit requires strictly positive finite data",
            what
        )));
    }
    Ok(())
}

/// Lognormal fit: closed-form MLE on ln x
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogNormalFit {
    /// Mean of ln x
    pub mu: f64,
    /// Standard deviation of ln x
    pub sigma: f64,
}

impl LogNormalFit {
    pub fn fit(data: &[f64]) -> Result<Self> {
        require_positive(data, "lognormal")?;
        let logs: Vec<f64> = data.iter().map(|x| x.ln()).collect();
        let mu = mean(&logs);
        let sigma = std_dev(&logs);
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(SeastateError::FitFailed(
                "lognormal fit produced a degenerate scale".to_string(),
            ));
        }
        Ok(Self { mu, sigma })
    }

    fn dist(&self) -> Result<LogNormal> {
        LogNormal::new(self.mu, self.sigma)
            .map_err(|e| SeastateError::FitFailed(format!("lognormal: {}", e)))
    }

    pub fn cdf(&self, x: f64) -> Result<f64> {
        Ok(self.dist()?.cdf(x))
    }

    pub fn quantile(&self, p: f64) -> Result<f64> {
        Ok(self.dist()?.inverse_cdf(clamp_probability(p)))
    }
}

/// Two-parameter Weibull fit via Newton iteration on the shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeibullFit {
    pub shape: f64,
    pub scale: f64,
}

impl WeibullFit {
    pub fn fit(data: &[f64]) -> Result<Self> {
        require_positive(data, "Weibull")?;

        let logs: Vec<f64> = data.iter().map(|x| x.ln()).collect();
        let log_mean = mean(&logs);
        let log_std = std_dev(&logs);
        if !log_std.is_finite() || log_std <= 0.0 {
            return Err(SeastateError::FitFailed(
                "Weibull fit requires dispersed data".to_string(),
            ));
        }

        // Moment start from the extreme-value relation std(ln x) = pi / (k sqrt 6)
        let mut k = std::f64::consts::PI / (log_std * 6.0_f64.sqrt());
        k = k.clamp(0.05, 50.0);

        let mut converged = false;
        for iteration in 0..100 {
            let mut a = 0.0; // sum x^k
            let mut b = 0.0; // sum x^k ln x
            let mut c = 0.0; // sum x^k (ln x)^2
            for (&x, &lx) in data.iter().zip(&logs) {
                let xk = x.powf(k);
                a += xk;
                b += xk * lx;
                c += xk * lx * lx;
            }

            let g = b / a - 1.0 / k - log_mean;
            let dg = (c * a - b * b) / (a * a) + 1.0 / (k * k);
            if dg.abs() < f64::EPSILON {
                break;
            }

            let step = g / dg;
            k -= step;
            if !k.is_finite() || k <= 0.0 {
                return Err(SeastateError::FitFailed(
                    "Weibull shape iteration diverged".to_string(),
                ));
            }
            if step.abs() < 1e-10 {
                debug!(iterations = iteration + 1, shape = k, "Weibull shape converged");
                converged = true;
                break;
            }
        }
        if !converged {
            return Err(SeastateError::FitFailed(
                "Weibull shape iteration did not converge".to_string(),
            ));
        }

        let a: f64 = data.iter().map(|x| x.powf(k)).sum();
        let scale = (a / data.len() as f64).powf(1.0 / k);

        Ok(Self { shape: k, scale })
    }

    fn dist(&self) -> Result<Weibull> {
        Weibull::new(self.shape, self.scale)
            .map_err(|e| SeastateError::FitFailed(format!("Weibull: {}", e)))
    }

    pub fn cdf(&self, x: f64) -> Result<f64> {
        Ok(self.dist()?.cdf(x))
    }

    pub fn quantile(&self, p: f64) -> Result<f64> {
        Ok(self.dist()?.inverse_cdf(clamp_probability(p)))
    }
}

/// Inverse Gaussian fit: closed-form MLE
///
/// CDF from the normal-CDF identity
/// `F(x) = Phi(sqrt(l/x)(x/m - 1)) + exp(2l/m) Phi(-sqrt(l/x)(x/m + 1))`,
/// quantile by bracketed bisection on the CDF.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseGaussianFit {
    pub mu: f64,
    pub lambda: f64,
}

impl InverseGaussianFit {
    pub fn fit(data: &[f64]) -> Result<Self> {
        require_positive(data, "inverse Gaussian")?;
        let mu = mean(data);
        let reciprocal_excess: f64 = data.iter().map(|&x| 1.0 / x - 1.0 / mu).sum();
        if reciprocal_excess <= 0.0 {
            return Err(SeastateError::FitFailed(
                "inverse Gaussian fit produced a non-positive shape".to_string(),
            ));
        }
        let lambda = data.len() as f64 / reciprocal_excess;
        Ok(Self { mu, lambda })
    }

    pub fn cdf(&self, x: f64) -> Result<f64> {
        if x <= 0.0 {
            return Ok(0.0);
        }
        let normal = standard_normal()?;
        let root = (self.lambda / x).sqrt();
        let a = normal.cdf(root * (x / self.mu - 1.0));
        // exp can overflow for large lambda/mu; the paired Phi term decays faster
        let exponent = 2.0 * self.lambda / self.mu;
        let b = if exponent > 700.0 {
            0.0
        } else {
            exponent.exp() * normal.cdf(-root * (x / self.mu + 1.0))
        };
        Ok((a + b).clamp(0.0, 1.0))
    }

    pub fn quantile(&self, p: f64) -> Result<f64> {
        let p = clamp_probability(p);

        // Bracket the root, growing the upper bound until the CDF passes p
        let mut lo = 0.0;
        let mut hi = self.mu.max(1.0);
        let mut expansions = 0;
        while self.cdf(hi)? < p {
            hi *= 2.0;
            expansions += 1;
            if expansions > 200 {
                return Err(SeastateError::Numerical(
                    "inverse Gaussian quantile bracket failed to expand".to_string(),
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
            if hi - lo < 1e-10 * self.mu.max(1.0) {
                break;
            }
        }
        Ok(0.5 * (lo + hi))
    }
}

/// Shared standard normal distribution handle
pub fn standard_normal() -> Result<Normal> {
    Normal::new(0.0, 1.0).map_err(|e| SeastateError::Numerical(format!("standard normal: {}", e)))
}

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> Result<f64> {
    Ok(standard_normal()?.cdf(x))
}

/// Standard normal quantile
pub fn norm_quantile(p: f64) -> Result<f64> {
    Ok(standard_normal()?.inverse_cdf(clamp_probability(p)))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic Weibull-distributed sample via inverse transform of a
    /// probability grid
    fn weibull_grid(shape: f64, scale: f64, n: usize) -> Vec<f64> {
        (1..=n)
            .map(|i| {
                let p = i as f64 / (n + 1) as f64;
                scale * (-(1.0 - p).ln()).powf(1.0 / shape)
            })
            .collect()
    }

    #[test]
    fn test_weibull_fit_recovers_parameters() {
        let data = weibull_grid(1.7, 2.5, 4000);
        let fit = WeibullFit::fit(&data).unwrap();
        assert!((fit.shape - 1.7).abs() / 1.7 < 0.05, "shape {}", fit.shape);
        assert!((fit.scale - 2.5).abs() / 2.5 < 0.05, "scale {}", fit.scale);
    }

    #[test]
    fn test_weibull_quantile_inverts_cdf() {
        let fit = WeibullFit { shape: 2.0, scale: 3.0 };
        let x = fit.quantile(0.8).unwrap();
        assert!((fit.cdf(x).unwrap() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_lognormal_fit() {
        let data: Vec<f64> = (1..=2000)
            .map(|i| {
                let p = i as f64 / 2001.0;
                // quantile of LogNormal(mu=1, sigma=0.5)
                (1.0 + 0.5 * super::standard_normal().unwrap().inverse_cdf(p)).exp()
            })
            .collect();
        let fit = LogNormalFit::fit(&data).unwrap();
        assert!((fit.mu - 1.0).abs() < 0.05);
        assert!((fit.sigma - 0.5).abs() < 0.05);
    }

    #[test]
    fn test_inverse_gaussian_cdf_monotone_and_invertible() {
        let fit = InverseGaussianFit { mu: 2.0, lambda: 5.0 };
        let c1 = fit.cdf(1.0).unwrap();
        let c2 = fit.cdf(2.0).unwrap();
        let c3 = fit.cdf(4.0).unwrap();
        assert!(c1 < c2 && c2 < c3);

        let x = fit.quantile(0.6).unwrap();
        assert!((fit.cdf(x).unwrap() - 0.6).abs() < 1e-7);
    }

    #[test]
    fn test_inverse_gaussian_fit_on_grid() {
        // quantile-grid of the fitted distribution round-trips the parameters
        let reference = InverseGaussianFit { mu: 1.5, lambda: 4.0 };
        let data: Vec<f64> = (1..=500)
            .map(|i| reference.quantile(i as f64 / 501.0).unwrap())
            .collect();
        let fit = InverseGaussianFit::fit(&data).unwrap();
        assert!((fit.mu - 1.5).abs() / 1.5 < 0.05);
        assert!((fit.lambda - 4.0).abs() / 4.0 < 0.15);
    }

    #[test]
    fn test_fit_rejects_non_positive_data() {
        let data = vec![1.0; 20];
        let mut with_zero = data.clone();
        with_zero[5] = 0.0;
        assert!(WeibullFit::fit(&with_zero).is_err());
        assert!(LogNormalFit::fit(&with_zero).is_err());
        assert!(InverseGaussianFit::fit(&with_zero).is_err());
    }

    #[test]
    fn test_norm_quantile_matches_cdf() {
        let x = norm_quantile(0.975).unwrap();
        assert!((x - 1.959964).abs() < 1e-4);
        assert!((norm_cdf(x).unwrap() - 0.975).abs() < 1e-9);
    }
}
