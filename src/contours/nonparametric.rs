//! Non-parametric copula contour methods
//!
//! The copula families of the parametric methods paired with Gaussian kernel
//! density marginals for both hs and te. Useful when the parametric marginal
//! families misfit a record; the dependence parameter still comes from
//! Kendall's tau.

use tracing::debug;

use super::copula::CopulaFamily;
use super::{finish_contour, trace, validate_record, ContourMethod, ReturnPeriod};
use crate::models::{Buoy, Contour};
use crate::stats::{kendall_tau, norm_cdf, GaussianKde};
use crate::utils::errors::Result;

/// Copula contour method with KDE marginals
#[derive(Debug, Clone)]
pub struct NonParametricCopulaMethod {
    station_id: String,
    family: CopulaFamily,
    parameter: f64,
    tau: f64,
    hs_kde: GaussianKde,
    te_kde: GaussianKde,
}

impl NonParametricCopulaMethod {
    /// Fit KDE marginals and the family dependence on a buoy record
    pub fn fit(buoy: &Buoy, family: CopulaFamily) -> Result<Self> {
        validate_record(buoy)?;

        let hs = buoy.hs();
        let te = buoy.te();
        let tau = kendall_tau(&hs, &te)?;
        let parameter = family.parameter_from_tau(tau);
        let hs_kde = GaussianKde::fit(&hs)?;
        let te_kde = GaussianKde::fit(&te)?;

        debug!(
            station = %buoy.station_id,
            family = family.method_name(),
            tau = tau,
            hs_bandwidth = hs_kde.bandwidth(),
            te_bandwidth = te_kde.bandwidth(),
            "Non-parametric copula model fitted"
        );
        crate::utils::logging::log_method_fit(&buoy.station_id, self_name(family), buoy.len());

        Ok(Self {
            station_id: buoy.station_id.clone(),
            family,
            parameter,
            tau,
            hs_kde,
            te_kde,
        })
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }
}

fn self_name(family: CopulaFamily) -> &'static str {
    match family {
        CopulaFamily::Gaussian => "nonparametric-gaussian-copula",
        CopulaFamily::Gumbel => "nonparametric-gumbel-copula",
        CopulaFamily::Clayton => "nonparametric-clayton-copula",
    }
}

impl ContourMethod for NonParametricCopulaMethod {
    fn name(&self) -> &'static str {
        self_name(self.family)
    }

    fn station_id(&self) -> &str {
        &self.station_id
    }

    fn contour(&self, rp: &ReturnPeriod, n_angles: usize) -> Result<Contour> {
        let beta = rp.reliability_index()?;
        let points = trace(beta, n_angles, |u1, u2| {
            let u = norm_cdf(u1)?;
            let p = norm_cdf(u2)?;
            let h = self.hs_kde.quantile(u)?;
            let v = self.family.conditional_quantile(u, p, self.parameter)?;
            let t = self.te_kde.quantile(v)?;
            Ok((t, h))
        })?;
        Ok(finish_contour(self.name(), &self.station_id, rp, points))
    }
}
