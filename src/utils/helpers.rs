//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the toolkit.

use chrono::{DateTime, Utc};

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Linear interpolation between two points
///
/// Returns `y0` when the segment is degenerate (`x1 == x0`).
pub fn lerp(x0: f64, y0: f64, x1: f64, y1: f64, x: f64) -> f64 {
    if (x1 - x0).abs() < f64::EPSILON {
        y0
    } else {
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }
}

/// Sanitize a station identifier for use in file names
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 0.0, 1.0, 2.0, 0.5) - 1.0).abs() < 1e-12);
        assert!((lerp(1.0, 5.0, 1.0, 9.0, 1.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("46022"), "46022");
        assert_eq!(sanitize_filename("46022/w"), "46022_w");
    }

    #[test]
    fn test_format_timestamp() {
        use chrono::TimeZone;
        let ts = Utc.with_ymd_and_hms(2020, 6, 1, 12, 30, 0).unwrap();
        assert_eq!(format_timestamp(ts), "2020-06-01 12:30:00 UTC");
    }
}
