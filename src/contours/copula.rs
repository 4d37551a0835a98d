//! Parametric copula contour methods
//!
//! The Gaussian, Gumbel and Clayton families share one scaffold: a Weibull
//! marginal for hs, a binned conditional lognormal for te given hs (mean
//! linear in ln h, spread quadratic in h) and a dependence parameter derived
//! from Kendall's tau. The contour maps each beta-circle point through the
//! hs marginal and the family's conditional copula inverse.

use tracing::{debug, warn};

use super::{finish_contour, trace, validate_record, ContourMethod, ReturnPeriod};
use crate::models::{Buoy, Contour};
use crate::stats::{
    fit_poly, kendall_tau, mean, norm_cdf, norm_quantile, LogNormalFit, PolyFit, WeibullFit,
};
use crate::utils::errors::{Result, SeastateError};

/// Minimum bins for the conditional lognormal fit
const MIN_BINS: usize = 3;

/// Spread floor keeping the conditional lognormal non-degenerate
const SIGMA_FLOOR: f64 = 1e-4;

/// Supported copula families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopulaFamily {
    Gaussian,
    Gumbel,
    Clayton,
}

impl CopulaFamily {
    /// Method identifier for the parametric variant
    pub fn method_name(&self) -> &'static str {
        match self {
            CopulaFamily::Gaussian => "gaussian-copula",
            CopulaFamily::Gumbel => "gumbel-copula",
            CopulaFamily::Clayton => "clayton-copula",
        }
    }

    /// Dependence parameter from Kendall's tau
    ///
    /// Gumbel and Clayton cannot represent negative dependence; tau is
    /// clamped at independence with a warning in that case.
    pub(crate) fn parameter_from_tau(self, tau: f64) -> f64 {
        // keep extreme dependence away from the numerical boundary
        let tau = tau.clamp(-0.99, 0.99);
        match self {
            CopulaFamily::Gaussian => (std::f64::consts::PI * tau / 2.0).sin(),
            CopulaFamily::Gumbel => {
                if tau < 0.0 {
                    warn!(tau = tau, "Gumbel copula clamped to independence for negative tau");
                    1.0
                } else {
                    1.0 / (1.0 - tau)
                }
            }
            CopulaFamily::Clayton => {
                if tau <= 0.0 {
                    warn!(tau = tau, "Clayton copula clamped to independence for non-positive tau");
                    1e-6
                } else {
                    2.0 * tau / (1.0 - tau)
                }
            }
        }
    }

    /// Inverse of the conditional copula: the `v` with `C(v | u) = p`
    pub(crate) fn conditional_quantile(self, u: f64, p: f64, parameter: f64) -> Result<f64> {
        let u = crate::stats::clamp_probability(u);
        let p = crate::stats::clamp_probability(p);
        match self {
            CopulaFamily::Gaussian => {
                let rho = parameter;
                let z_u = norm_quantile(u)?;
                let z_p = norm_quantile(p)?;
                norm_cdf(rho * z_u + (1.0 - rho * rho).max(0.0).sqrt() * z_p)
            }
            CopulaFamily::Clayton => {
                let theta = parameter;
                let v = (1.0 + u.powf(-theta) * (p.powf(-theta / (1.0 + theta)) - 1.0))
                    .powf(-1.0 / theta);
                Ok(crate::stats::clamp_probability(v))
            }
            CopulaFamily::Gumbel => invert_gumbel_conditional(u, p, parameter),
        }
    }
}

/// Conditional CDF of the Gumbel copula, `C(v | u)`
fn gumbel_conditional(u: f64, v: f64, theta: f64) -> f64 {
    let lu = -u.ln();
    let lv = -v.ln();
    let s = lu.powf(theta) + lv.powf(theta);
    let c = (-s.powf(1.0 / theta)).exp();
    c * s.powf(1.0 / theta - 1.0) * lu.powf(theta - 1.0) / u
}

/// Invert the Gumbel conditional CDF in `v` by bisection
fn invert_gumbel_conditional(u: f64, p: f64, theta: f64) -> Result<f64> {
    if theta < 1.0 {
        return Err(SeastateError::InvalidInput(format!(
            "Gumbel copula parameter must be >= 1, got {}",
            theta
        )));
    }

    let mut lo = 1e-12;
    let mut hi = 1.0 - 1e-12;
    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if gumbel_conditional(u, mid, theta) < p {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo < 1e-12 {
            break;
        }
    }
    Ok(0.5 * (lo + hi))
}

/// Conditional lognormal model of te given hs
#[derive(Debug, Clone)]
pub(crate) struct ConditionalLogNormal {
    /// Mean of ln te as a function of ln h
    mu_fit: PolyFit,
    /// Spread of ln te as a function of h
    sigma_fit: PolyFit,
    /// Smallest bin center; mean evaluation clamps below it
    h_floor: f64,
}

impl ConditionalLogNormal {
    /// Fit the binned conditional model over hs
    pub(crate) fn fit(hs: &[f64], te: &[f64], bin_size: usize) -> Result<Self> {
        let mut order: Vec<usize> = (0..hs.len()).collect();
        order.sort_by(|&a, &b| hs[a].total_cmp(&hs[b]));

        let n_bins = hs.len() / bin_size;
        if n_bins < MIN_BINS {
            return Err(SeastateError::InsufficientData(format!(
                "conditional fit needs at least {} bins of {} points, record has {}",
                MIN_BINS,
                bin_size,
                hs.len()
            )));
        }

        let mut centers = Vec::with_capacity(n_bins);
        let mut log_means = Vec::with_capacity(n_bins);
        let mut log_spreads = Vec::with_capacity(n_bins);
        for b in 0..n_bins {
            let start = b * bin_size;
            let end = if b == n_bins - 1 { hs.len() } else { start + bin_size };
            let h_bin: Vec<f64> = order[start..end].iter().map(|&i| hs[i]).collect();
            let te_bin: Vec<f64> = order[start..end].iter().map(|&i| te[i]).collect();
            let bin_fit = LogNormalFit::fit(&te_bin)?;
            centers.push(mean(&h_bin));
            log_means.push(bin_fit.mu);
            log_spreads.push(bin_fit.sigma.max(SIGMA_FLOOR));
        }

        let ln_centers: Vec<f64> = centers.iter().map(|&c| c.ln()).collect();
        let mu_fit = fit_poly(&ln_centers, &log_means, 1)?;
        let sigma_fit = fit_poly(&centers, &log_spreads, 2)?;

        debug!(bins = n_bins, "Conditional lognormal fitted");

        Ok(Self {
            mu_fit,
            sigma_fit,
            h_floor: centers[0],
        })
    }

    fn mu(&self, h: f64) -> f64 {
        self.mu_fit.eval(h.max(self.h_floor * 0.1).ln())
    }

    fn sigma(&self, h: f64) -> f64 {
        self.sigma_fit.eval(h).max(SIGMA_FLOOR)
    }

    /// Quantile of te given hs
    pub(crate) fn quantile(&self, h: f64, p: f64) -> Result<f64> {
        let z = norm_quantile(p)?;
        Ok((self.mu(h) + self.sigma(h) * z).exp())
    }
}

/// Marginal and dependence fits shared by the parametric methods
#[derive(Debug, Clone)]
pub(crate) struct ParametricMarginals {
    pub(crate) hs: WeibullFit,
    pub(crate) cond: ConditionalLogNormal,
    pub(crate) tau: f64,
}

impl ParametricMarginals {
    pub(crate) fn fit(buoy: &Buoy, bin_size: usize) -> Result<Self> {
        validate_record(buoy)?;
        let hs = buoy.hs();
        let te = buoy.te();
        Ok(Self {
            hs: WeibullFit::fit(&hs)?,
            cond: ConditionalLogNormal::fit(&hs, &te, bin_size)?,
            tau: kendall_tau(&hs, &te)?,
        })
    }
}

/// Parametric copula contour method for one family
#[derive(Debug, Clone)]
pub struct CopulaContourMethod {
    station_id: String,
    family: CopulaFamily,
    marginals: ParametricMarginals,
    parameter: f64,
}

impl CopulaContourMethod {
    /// Fit the copula model on a buoy record
    pub fn fit(buoy: &Buoy, family: CopulaFamily, bin_size: usize) -> Result<Self> {
        let marginals = ParametricMarginals::fit(buoy, bin_size)?;
        let parameter = family.parameter_from_tau(marginals.tau);

        debug!(
            station = %buoy.station_id,
            family = family.method_name(),
            tau = marginals.tau,
            parameter = parameter,
            "Copula model fitted"
        );
        crate::utils::logging::log_method_fit(&buoy.station_id, family.method_name(), buoy.len());

        Ok(Self {
            station_id: buoy.station_id.clone(),
            family,
            marginals,
            parameter,
        })
    }

    pub fn family(&self) -> CopulaFamily {
        self.family
    }

    /// Kendall's tau of the fitted record
    pub fn tau(&self) -> f64 {
        self.marginals.tau
    }
}

impl ContourMethod for CopulaContourMethod {
    fn name(&self) -> &'static str {
        self.family.method_name()
    }

    fn station_id(&self) -> &str {
        &self.station_id
    }

    fn contour(&self, rp: &ReturnPeriod, n_angles: usize) -> Result<Contour> {
        let beta = rp.reliability_index()?;
        let points = trace(beta, n_angles, |u1, u2| {
            let u = norm_cdf(u1)?;
            let p = norm_cdf(u2)?;
            let h = self.marginals.hs.quantile(u)?;
            let v = self.family.conditional_quantile(u, p, self.parameter)?;
            let t = self.marginals.cond.quantile(h, v)?;
            Ok((t, h))
        })?;
        Ok(finish_contour(self.name(), &self.station_id, rp, points))
    }
}
