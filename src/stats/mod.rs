//! Statistical support layer
//!
//! Descriptive statistics, parametric distribution fits, rank dependence,
//! kernel density estimation and small least-squares fits. Everything here is
//! pure and synchronous; the contour methods are built on top of it.

pub mod dependence;
pub mod descriptive;
pub mod fits;
pub mod kde;
pub mod regression;

pub use dependence::kendall_tau;
pub use descriptive::{covariance, iqr, mean, percentile, std_dev, variance};
pub use fits::{
    clamp_probability, norm_cdf, norm_quantile, InverseGaussianFit, LogNormalFit, WeibullFit,
};
pub use kde::GaussianKde;
pub use regression::{fit_poly, PolyFit};
