//! Descriptive statistics
//!
//! Small numeric helpers shared by the fitting and contour code.

use crate::utils::errors::{Result, SeastateError};

/// Arithmetic mean
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Sample variance (n - 1 denominator)
pub fn variance(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return f64::NAN;
    }
    let m = mean(data);
    data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (data.len() - 1) as f64
}

/// Sample standard deviation
pub fn std_dev(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Sample covariance of two equally long columns
pub fn covariance(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(SeastateError::InvalidInput(
            "covariance requires columns of equal length".to_string(),
        ));
    }
    if x.len() < 2 {
        return Err(SeastateError::InsufficientData(
            "covariance requires at least two observations".to_string(),
        ));
    }
    let mx = mean(x);
    let my = mean(y);
    let sum: f64 = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum();
    Ok(sum / (x.len() - 1) as f64)
}

/// Percentile with linear interpolation between order statistics
///
/// `p` is a fraction in [0, 1].
pub fn percentile(data: &[f64], p: f64) -> Result<f64> {
    if data.is_empty() {
        return Err(SeastateError::InsufficientData(
            "percentile of an empty slice".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(SeastateError::InvalidInput(format!(
            "percentile fraction out of range: {}",
            p
        )));
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Ok(sorted[lo]);
    }
    let frac = pos - lo as f64;
    Ok(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Interquartile range
pub fn iqr(data: &[f64]) -> Result<f64> {
    Ok(percentile(data, 0.75)? - percentile(data, 0.25)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_variance() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&data) - 5.0).abs() < 1e-12);
        assert!((variance(&data) - 32.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_interpolates() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert!((percentile(&data, 0.0).unwrap() - 1.0).abs() < 1e-12);
        assert!((percentile(&data, 1.0).unwrap() - 4.0).abs() < 1e-12);
        assert!((percentile(&data, 0.5).unwrap() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_rejects_bad_fraction() {
        assert!(percentile(&[1.0], 1.5).is_err());
    }

    #[test]
    fn test_covariance_of_linear_columns() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        let c = covariance(&x, &y).unwrap();
        assert!((c - 2.0 * variance(&x)).abs() < 1e-12);
    }
}
