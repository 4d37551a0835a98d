//! Rank dependence measures
//!
//! Kendall's tau-b computed with Knight's O(n log n) algorithm: sort by the
//! first column, count discordant pairs as merge-sort exchanges on the second,
//! correct for ties in either margin.

use crate::utils::errors::{Result, SeastateError};

/// Kendall's tau-b rank correlation of two equally long columns
pub fn kendall_tau(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(SeastateError::InvalidInput(
            "kendall_tau requires columns of equal length".to_string(),
        ));
    }
    let n = x.len();
    if n < 2 {
        return Err(SeastateError::InsufficientData(
            "kendall_tau requires at least two observations".to_string(),
        ));
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Err(SeastateError::InvalidInput(
            "kendall_tau requires finite data".to_string(),
        ));
    }

    let mut pairs: Vec<(f64, f64)> = x.iter().copied().zip(y.iter().copied()).collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let n0 = n as f64 * (n as f64 - 1.0) / 2.0;

    // Ties in x (n1) and joint ties (n3), counted over runs of the x-sorted data
    let mut n1 = 0.0;
    let mut n3 = 0.0;
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && pairs[j].0 == pairs[i].0 {
            j += 1;
        }
        let run = (j - i) as f64;
        n1 += run * (run - 1.0) / 2.0;

        let mut k = i;
        while k < j {
            let mut l = k + 1;
            while l < j && pairs[l].1 == pairs[k].1 {
                l += 1;
            }
            let joint = (l - k) as f64;
            n3 += joint * (joint - 1.0) / 2.0;
            k = l;
        }
        i = j;
    }

    // Discordant pairs: exchanges needed to sort the y column
    let mut ys: Vec<f64> = pairs.iter().map(|p| p.1).collect();
    let discordant = merge_count(&mut ys);

    // Ties in y (n2), counted on the now sorted y column
    let mut n2 = 0.0;
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && ys[j] == ys[i] {
            j += 1;
        }
        let run = (j - i) as f64;
        n2 += run * (run - 1.0) / 2.0;
        i = j;
    }

    let numerator = n0 - n1 - n2 + n3 - 2.0 * discordant;
    let denominator = ((n0 - n1) * (n0 - n2)).sqrt();
    if denominator <= 0.0 {
        return Err(SeastateError::InsufficientData(
            "kendall_tau is undefined for a constant column".to_string(),
        ));
    }

    Ok((numerator / denominator).clamp(-1.0, 1.0))
}

/// Sort in place by merge sort, returning the number of exchanged pairs
/// (pairs in strictly decreasing order); equal elements count as no exchange
fn merge_count(values: &mut [f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mut buffer = vec![0.0; n];
    merge_count_rec(values, &mut buffer)
}

fn merge_count_rec(values: &mut [f64], buffer: &mut [f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mid = n / 2;
    let (left, right) = values.split_at_mut(mid);
    let mut swaps = merge_count_rec(left, &mut buffer[..mid]) + merge_count_rec(right, &mut buffer[mid..]);

    let mut i = 0;
    let mut j = 0;
    let mut k = 0;
    while i < left.len() && j < right.len() {
        if left[i] <= right[j] {
            buffer[k] = left[i];
            i += 1;
        } else {
            buffer[k] = right[j];
            swaps += (left.len() - i) as f64;
            j += 1;
        }
        k += 1;
    }
    while i < left.len() {
        buffer[k] = left[i];
        i += 1;
        k += 1;
    }
    while j < right.len() {
        buffer[k] = right[j];
        j += 1;
        k += 1;
    }
    values.copy_from_slice(&buffer[..n]);
    swaps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_concordance() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert!((kendall_tau(&x, &y).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_discordance() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [5.0, 4.0, 3.0, 2.0, 1.0];
        assert!((kendall_tau(&x, &y).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_known_mixed_case() {
        // concordant = 4, discordant = 2 over n0 = 6 pairs
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [1.0, 3.0, 2.0, 4.0];
        let tau = kendall_tau(&x, &y).unwrap();
        assert!((tau - (4.0 - 2.0) / 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_tie_correction() {
        // x has one tied pair: n0 = 6, n1 = 1, n2 = 0, D = 0, numerator = 5
        let x = [1.0, 1.0, 2.0, 3.0];
        let y = [1.0, 2.0, 3.0, 4.0];
        let tau = kendall_tau(&x, &y).unwrap();
        let expected = 5.0 / (5.0_f64 * 6.0).sqrt();
        assert!((tau - expected).abs() < 1e-12);
    }

    #[test]
    fn test_constant_column_is_undefined() {
        let x = [1.0, 1.0, 1.0];
        let y = [1.0, 2.0, 3.0];
        assert!(kendall_tau(&x, &y).is_err());
    }
}
