//! NDBC spectral wave density table parsing
//!
//! Historical `swden` files carry one wave spectrum per row: date columns
//! (2- or 4-digit year, month, day, hour, optional minute) followed by the
//! spectral density in m^2/Hz over the frequency grid given in the header.
//! Each spectrum is reduced to a sea state through its spectral moments:
//! `Hs = 4 sqrt(m0)` and `Te = m_-1 / m0`, with moments integrated by the
//! trapezoidal rule over the header frequencies.

use chrono::{TimeZone, Utc};
use tracing::debug;

use crate::models::SeaState;
use crate::utils::errors::{Result, SeastateError};

/// NDBC missing-data sentinels found in density columns
const MISSING_SENTINELS: [f64; 2] = [99.0, 999.0];

/// Outcome of parsing one yearly spectral table
#[derive(Debug, Clone)]
pub struct ParsedSpectra {
    pub records: Vec<SeaState>,
    /// Rows dropped for missing sentinels, zero spectra or malformed fields
    pub skipped_rows: usize,
}

/// Parse a spectral wave density table into sea states
pub fn parse_spectral_table(text: &str) -> Result<ParsedSpectra> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let header = lines
        .next()
        .ok_or_else(|| SeastateError::MalformedTable("empty spectral table".to_string()))?;
    let (date_columns, frequencies) = parse_header(header)?;

    let mut records = Vec::new();
    let mut skipped_rows = 0;

    for line in lines {
        // Some archives repeat a commented units line below the header
        if line.trim_start().starts_with('#') {
            continue;
        }
        match parse_row(line, date_columns, &frequencies) {
            Some(record) => records.push(record),
            None => skipped_rows += 1,
        }
    }

    if records.is_empty() && skipped_rows == 0 {
        return Err(SeastateError::MalformedTable(
            "spectral table has a header but no data rows".to_string(),
        ));
    }

    debug!(
        records = records.len(),
        skipped_rows = skipped_rows,
        "Parsed spectral table"
    );

    Ok(ParsedSpectra {
        records,
        skipped_rows,
    })
}

/// Split the header into date column count and frequency grid
///
/// Date column labels (`YY MM DD hh mm`) do not parse as numbers; the first
/// numeric token starts the frequency grid.
fn parse_header(header: &str) -> Result<(usize, Vec<f64>)> {
    let tokens: Vec<&str> = header.trim_start_matches('#').split_whitespace().collect();
    let first_freq = tokens
        .iter()
        .position(|t| t.parse::<f64>().is_ok())
        .ok_or_else(|| {
            SeastateError::MalformedTable("spectral header has no frequency columns".to_string())
        })?;

    if !(4..=5).contains(&first_freq) {
        return Err(SeastateError::MalformedTable(format!(
            "unexpected date column count in spectral header: {}",
            first_freq
        )));
    }

    let frequencies: Vec<f64> = tokens[first_freq..]
        .iter()
        .filter_map(|t| t.parse::<f64>().ok())
        .collect();

    if frequencies.len() < 3 {
        return Err(SeastateError::MalformedTable(format!(
            "spectral header carries only {} frequency bins",
            frequencies.len()
        )));
    }
    if frequencies.windows(2).any(|w| w[0] >= w[1]) || frequencies[0] <= 0.0 {
        return Err(SeastateError::MalformedTable(
            "spectral header frequencies must be positive and increasing".to_string(),
        ));
    }

    Ok((first_freq, frequencies))
}

fn parse_row(line: &str, date_columns: usize, frequencies: &[f64]) -> Option<SeaState> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != date_columns + frequencies.len() {
        return None;
    }

    let mut date = [0u32; 5];
    for (slot, token) in date.iter_mut().zip(&tokens[..date_columns]) {
        *slot = token.parse().ok()?;
    }
    let year = if date[0] < 100 { 1900 + date[0] } else { date[0] } as i32;
    let minute = if date_columns == 5 { date[4] } else { 0 };
    let time = Utc
        .with_ymd_and_hms(year, date[1], date[2], date[3], minute, 0)
        .single()?;

    let mut densities = Vec::with_capacity(frequencies.len());
    for token in &tokens[date_columns..] {
        let value: f64 = token.parse().ok()?;
        if MISSING_SENTINELS.contains(&value) || value < 0.0 {
            return None;
        }
        densities.push(value);
    }

    let m0 = spectral_moment(frequencies, &densities, 0);
    if m0 <= 0.0 {
        return None;
    }
    let m_minus_1 = spectral_moment(frequencies, &densities, -1);

    let hs = 4.0 * m0.sqrt();
    let te = m_minus_1 / m0;
    let record = SeaState::new(time, hs, te);
    record.is_plausible().then_some(record)
}

/// Trapezoidal spectral moment `m_n = integral S(f) f^n df`
fn spectral_moment(frequencies: &[f64], densities: &[f64], order: i32) -> f64 {
    let weighted: Vec<f64> = frequencies
        .iter()
        .zip(densities)
        .map(|(&f, &s)| s * f.powi(order))
        .collect();

    frequencies
        .windows(2)
        .zip(weighted.windows(2))
        .map(|(f, w)| 0.5 * (w[0] + w[1]) * (f[1] - f[0]))
        .sum()
}
