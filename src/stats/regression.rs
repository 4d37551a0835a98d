//! Least-squares polynomial regression
//!
//! Closed-form ordinary least squares for the low-degree polynomial models
//! used by the conditional component fits (linear mean, quadratic spread).
//! The normal equations are solved by Gaussian elimination with partial
//! pivoting; the systems here are at most 3x3.

use crate::utils::errors::{Result, SeastateError};

/// A fitted polynomial with coefficients in ascending degree order
#[derive(Debug, Clone, PartialEq)]
pub struct PolyFit {
    pub coeffs: Vec<f64>,
}

impl PolyFit {
    /// Evaluate the polynomial at `x`
    pub fn eval(&self, x: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }
}

/// Fit a polynomial of the given degree by ordinary least squares
pub fn fit_poly(x: &[f64], y: &[f64], degree: usize) -> Result<PolyFit> {
    if x.len() != y.len() {
        return Err(SeastateError::InvalidInput(
            "fit_poly requires columns of equal length".to_string(),
        ));
    }
    if degree > 4 {
        return Err(SeastateError::InvalidInput(format!(
            "fit_poly supports degrees up to 4, got {}",
            degree
        )));
    }
    let m = degree + 1;
    if x.len() < m {
        return Err(SeastateError::InsufficientData(format!(
            "fit_poly degree {} requires at least {} points, got {}",
            degree,
            m,
            x.len()
        )));
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Err(SeastateError::InvalidInput(
            "fit_poly requires finite data".to_string(),
        ));
    }

    // Normal equations: A c = b with A[i][j] = sum x^(i+j), b[i] = sum y x^i
    let mut powers = vec![0.0; 2 * m - 1];
    for &xi in x {
        let mut pw = 1.0;
        for p in powers.iter_mut() {
            *p += pw;
            pw *= xi;
        }
    }
    let mut a = vec![vec![0.0; m]; m];
    for (i, row) in a.iter_mut().enumerate() {
        for (j, entry) in row.iter_mut().enumerate() {
            *entry = powers[i + j];
        }
    }
    let mut b = vec![0.0; m];
    for (&xi, &yi) in x.iter().zip(y) {
        let mut pw = 1.0;
        for bi in b.iter_mut() {
            *bi += yi * pw;
            pw *= xi;
        }
    }

    let coeffs = solve(a, b)?;
    Ok(PolyFit { coeffs })
}

/// Solve a small dense linear system by Gaussian elimination with partial
/// pivoting
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot][col].abs() < 1e-12 {
            return Err(SeastateError::Numerical(
                "singular normal equations in polynomial fit".to_string(),
            ));
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let mut sum = b[row];
        for col in row + 1..n {
            sum -= a[row][col] * x[col];
        }
        x[row] = sum / a[row][row];
    }
    Ok(x)
}
