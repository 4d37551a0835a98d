//! Bootstrap confidence intervals for contours
//!
//! Resamples the sea state record with replacement, refits the PCA method on
//! every replicate and keeps the per-angle percentile envelope of the
//! replicate contours. Replicates whose fit fails are skipped and counted;
//! angles where too few replicates produce a physical point are left out of
//! the envelope. Stable intervals require large resample counts.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use super::pca::PcaContourMethod;
use super::ReturnPeriod;
use crate::models::{Buoy, ContourInterval, ContourPoint};
use crate::stats::percentile;
use crate::utils::errors::{Result, SeastateError};

/// Smallest number of usable replicates for an interval
const MIN_REPLICATES: usize = 10;

/// Bootstrap a percentile confidence envelope of the PCA contour
pub fn bootstrap_pca_contour(
    buoy: &Buoy,
    rp: &ReturnPeriod,
    n_angles: usize,
    bin_size: usize,
    resamples: usize,
    confidence: f64,
    seed: u64,
) -> Result<ContourInterval> {
    if !(0.0..1.0).contains(&confidence) || confidence == 0.0 {
        return Err(SeastateError::InvalidInput(format!(
            "confidence must lie in (0, 1), got {}",
            confidence
        )));
    }
    if resamples < MIN_REPLICATES {
        return Err(SeastateError::InvalidInput(format!(
            "bootstrap requires at least {} resamples",
            MIN_REPLICATES
        )));
    }
    if resamples < 100 {
        warn!(
            resamples = resamples,
            "Small bootstrap; intervals are unlikely to be stable"
        );
    }

    let beta = rp.reliability_index()?;
    let mut rng = StdRng::seed_from_u64(seed);
    let n = buoy.len();
    let mut kept: Vec<Vec<(f64, f64)>> = Vec::with_capacity(resamples);
    let mut failed = 0usize;

    for replicate in 0..resamples {
        let mut resampled = buoy.clone();
        resampled.records = (0..n).map(|_| buoy.records[rng.gen_range(0..n)]).collect();

        let outcome = PcaContourMethod::fit(&resampled, bin_size)
            .and_then(|pca| pca.trace_raw(beta, n_angles));
        match outcome {
            Ok(points) => kept.push(points),
            Err(e) => {
                warn!(replicate = replicate, error = %e, "Bootstrap replicate skipped");
                failed += 1;
            }
        }
    }

    if kept.len() < MIN_REPLICATES {
        return Err(SeastateError::InsufficientData(format!(
            "only {} of {} bootstrap replicates produced a usable contour",
            kept.len(),
            resamples
        )));
    }

    let p_lo = (1.0 - confidence) / 2.0;
    let p_hi = 1.0 - p_lo;
    let mut lower = Vec::with_capacity(n_angles);
    let mut upper = Vec::with_capacity(n_angles);
    let mut dropped_angles = 0usize;
    for angle in 0..n_angles {
        let physical: Vec<(f64, f64)> = kept
            .iter()
            .map(|points| points[angle])
            .filter(|&(te, hs)| te.is_finite() && hs.is_finite() && te > 0.0 && hs > 0.0)
            .collect();
        if physical.len() < MIN_REPLICATES {
            dropped_angles += 1;
            continue;
        }
        let te: Vec<f64> = physical.iter().map(|&(te, _)| te).collect();
        let hs: Vec<f64> = physical.iter().map(|&(_, hs)| hs).collect();
        lower.push(ContourPoint {
            te: percentile(&te, p_lo)?,
            hs: percentile(&hs, p_lo)?,
        });
        upper.push(ContourPoint {
            te: percentile(&te, p_hi)?,
            hs: percentile(&hs, p_hi)?,
        });
    }

    if lower.is_empty() {
        return Err(SeastateError::InsufficientData(
            "no contour angle had enough physical bootstrap points".to_string(),
        ));
    }
    if dropped_angles > 0 {
        warn!(
            dropped_angles = dropped_angles,
            "Angles left out of the bootstrap envelope"
        );
    }

    info!(
        station = %buoy.station_id,
        replicates_used = kept.len(),
        failed = failed,
        confidence = confidence,
        angles = lower.len(),
        "Bootstrap interval computed"
    );

    Ok(ContourInterval {
        method: "pca".to_string(),
        station_id: buoy.station_id.clone(),
        return_period_years: rp.years,
        confidence,
        replicates_used: kept.len(),
        lower,
        upper,
    })
}
