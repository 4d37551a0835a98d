//! Rosenblatt transform contour method
//!
//! Direct conditional chain without a copula coupling: hs comes from the
//! Weibull marginal at the first normal coordinate and te from the binned
//! conditional lognormal at the second. Dependence enters only through the
//! conditioning of te on the contour's hs.

use tracing::debug;

use super::copula::ParametricMarginals;
use super::{finish_contour, trace, ContourMethod, ReturnPeriod};
use crate::models::{Buoy, Contour};
use crate::stats::norm_cdf;
use crate::utils::errors::Result;

/// Rosenblatt transform contour method
#[derive(Debug, Clone)]
pub struct RosenblattMethod {
    station_id: String,
    marginals: ParametricMarginals,
}

impl RosenblattMethod {
    /// Fit the conditional model on a buoy record
    pub fn fit(buoy: &Buoy, bin_size: usize) -> Result<Self> {
        let marginals = ParametricMarginals::fit(buoy, bin_size)?;

        debug!(station = %buoy.station_id, "Rosenblatt model fitted");
        crate::utils::logging::log_method_fit(&buoy.station_id, "rosenblatt", buoy.len());

        Ok(Self {
            station_id: buoy.station_id.clone(),
            marginals,
        })
    }
}

impl ContourMethod for RosenblattMethod {
    fn name(&self) -> &'static str {
        "rosenblatt"
    }

    fn station_id(&self) -> &str {
        &self.station_id
    }

    fn contour(&self, rp: &ReturnPeriod, n_angles: usize) -> Result<Contour> {
        let beta = rp.reliability_index()?;
        let points = trace(beta, n_angles, |u1, u2| {
            let h = self.marginals.hs.quantile(norm_cdf(u1)?)?;
            let t = self.marginals.cond.quantile(h, norm_cdf(u2)?)?;
            Ok((t, h))
        })?;
        Ok(finish_contour(self.name(), &self.station_id, rp, points))
    }
}
