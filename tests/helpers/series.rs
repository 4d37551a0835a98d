//! Deterministic synthetic measurement records

use chrono::{Duration, TimeZone, Utc};
use seastate::models::{Buoy, DataSource, SeaState};

/// Correlated synthetic record: hs follows a Weibull-like grid, te tracks hs
/// linearly with a bounded oscillation
pub fn synthetic_buoy(n: usize) -> Buoy {
    let start = Utc.with_ymd_and_hms(2005, 1, 1, 0, 0, 0).unwrap();
    let mut buoy = Buoy::new("T0001", DataSource::Ndbc);
    let records: Vec<SeaState> = (0..n)
        .map(|i| {
            let p = (i + 1) as f64 / (n + 1) as f64;
            let hs = 2.0 * (-(1.0 - p).ln()).powf(1.0 / 1.5);
            let wiggle = (i as f64 * 0.61).sin();
            let te = 5.5 + 2.3 * hs + 0.7 * wiggle;
            SeaState::new(start + Duration::hours(i as i64), hs, te)
        })
        .collect();
    buoy.push_records(records);
    buoy
}
