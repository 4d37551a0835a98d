//! Local archive service
//!
//! This service owns every file the toolkit reads or writes locally: the
//! measurement cache (JSON snapshot plus a plain text table) and the result
//! exports (contours, samples, bootstrap intervals). Corrupt cache files are
//! treated as absent so a fresh fetch can replace them.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use tracing::{debug, warn};

use crate::config::Settings;
use crate::models::{Buoy, Contour, ContourInterval, DataSource, SampleSet, SeaState};
use crate::utils::errors::{Result, SeastateError};
use crate::utils::helpers::sanitize_filename;
use crate::utils::logging::log_export;

/// Service for the local measurement cache and result exports
#[derive(Debug, Clone)]
pub struct ArchiveService {
    settings: Settings,
}

impl ArchiveService {
    /// Create a new ArchiveService instance
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Path of the JSON snapshot for a station
    pub fn snapshot_path(&self, station_id: &str) -> PathBuf {
        Path::new(&self.settings.cache.directory)
            .join(format!("ndbc_{}.json", sanitize_filename(station_id)))
    }

    /// Path of the text table for a station
    pub fn text_path(&self, station_id: &str) -> PathBuf {
        Path::new(&self.settings.cache.directory)
            .join(format!("ndbc_{}.txt", sanitize_filename(station_id)))
    }

    /// Write the JSON snapshot of a buoy series
    pub fn save_snapshot(&self, buoy: &Buoy) -> Result<PathBuf> {
        let path = self.snapshot_path(&buoy.station_id);
        write_with_parents(&path, &serde_json::to_vec_pretty(buoy)?)?;
        log_export("snapshot", &path.display().to_string());
        Ok(path)
    }

    /// Load the JSON snapshot if present
    ///
    /// A missing file returns `None`; a corrupt file is logged and treated as
    /// absent so the caller falls back to a fresh fetch.
    pub fn load_snapshot(&self, station_id: &str) -> Result<Option<Buoy>> {
        let path = self.snapshot_path(station_id);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        match serde_json::from_slice::<Buoy>(&bytes) {
            Ok(buoy) => {
                debug!(station = station_id, records = buoy.len(), "Loaded snapshot cache");
                Ok(Some(buoy))
            }
            Err(e) => {
                warn!(station = station_id, error = %e, "Ignoring corrupt snapshot cache");
                Ok(None)
            }
        }
    }

    /// Write the three-column text table (`unix-seconds hs te`)
    pub fn save_txt(&self, buoy: &Buoy) -> Result<PathBuf> {
        let path = self.text_path(&buoy.station_id);
        let mut out = String::new();
        out.push_str(&format!(
            "# station {} source {} exported {}\n# time_unix_s hs_m te_s\n",
            buoy.station_id,
            buoy.source,
            crate::utils::helpers::format_timestamp(Utc::now())
        ));
        for record in &buoy.records {
            out.push_str(&format!(
                "{} {:.4} {:.4}\n",
                record.time.timestamp(),
                record.hs,
                record.te
            ));
        }
        write_with_parents(&path, out.as_bytes())?;
        log_export("text-table", &path.display().to_string());
        Ok(path)
    }

    /// Load the text table if present
    pub fn load_txt(&self, station_id: &str) -> Result<Option<Buoy>> {
        let path = self.text_path(station_id);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)?;

        let mut records = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let mut parts = trimmed.split_whitespace();
            let (Some(ts), Some(hs), Some(te)) = (parts.next(), parts.next(), parts.next()) else {
                return Err(SeastateError::MalformedTable(format!(
                    "{}:{} expected three columns",
                    path.display(),
                    line_no + 1
                )));
            };
            let ts: i64 = ts.parse().map_err(|_| bad_field(&path, line_no, "time"))?;
            let hs: f64 = hs.parse().map_err(|_| bad_field(&path, line_no, "hs"))?;
            let te: f64 = te.parse().map_err(|_| bad_field(&path, line_no, "te"))?;
            let time = Utc
                .timestamp_opt(ts, 0)
                .single()
                .ok_or_else(|| bad_field(&path, line_no, "time"))?;
            records.push(SeaState::new(time, hs, te));
        }

        let mut buoy = Buoy::new(station_id, DataSource::Ndbc);
        buoy.push_records(records);
        debug!(station = station_id, records = buoy.len(), "Loaded text cache");
        Ok(Some(buoy))
    }

    fn output_path(&self, name: &str) -> PathBuf {
        Path::new(&self.settings.output.directory).join(name)
    }

    /// Export a contour as self-describing JSON
    pub fn export_contour_json(&self, contour: &Contour) -> Result<PathBuf> {
        let path = self.output_path(&format!(
            "{}_{}_contour.json",
            sanitize_filename(&contour.station_id),
            sanitize_filename(&contour.method)
        ));
        write_with_parents(&path, &serde_json::to_vec_pretty(contour)?)?;
        log_export("contour-json", &path.display().to_string());
        Ok(path)
    }

    /// Export a contour as a two-column text table
    pub fn export_contour_txt(&self, contour: &Contour) -> Result<PathBuf> {
        let path = self.output_path(&format!(
            "{}_{}_contour.txt",
            sanitize_filename(&contour.station_id),
            sanitize_filename(&contour.method)
        ));
        let mut out = format!(
            "# {} {}-year contour, station {}\n# te_s hs_m\n",
            contour.method, contour.return_period_years, contour.station_id
        );
        for point in &contour.points {
            out.push_str(&format!("{:.4} {:.4}\n", point.te, point.hs));
        }
        write_with_parents(&path, out.as_bytes())?;
        log_export("contour-txt", &path.display().to_string());
        Ok(path)
    }

    /// Export a sample set as JSON
    pub fn export_samples_json(&self, samples: &SampleSet) -> Result<PathBuf> {
        let path = self.output_path(&format!(
            "{}_samples.json",
            sanitize_filename(&samples.station_id)
        ));
        write_with_parents(&path, &serde_json::to_vec_pretty(samples)?)?;
        log_export("samples-json", &path.display().to_string());
        Ok(path)
    }

    /// Export a sample set as a three-column text table
    pub fn export_samples_txt(&self, samples: &SampleSet) -> Result<PathBuf> {
        let path = self.output_path(&format!(
            "{}_samples.txt",
            sanitize_filename(&samples.station_id)
        ));
        let mut out = format!(
            "# full sea state samples, station {}, seed {}\n# te_s hs_m weight\n",
            samples.station_id, samples.seed
        );
        for sample in &samples.samples {
            out.push_str(&format!(
                "{:.4} {:.4} {:.6e}\n",
                sample.te, sample.hs, sample.weight
            ));
        }
        write_with_parents(&path, out.as_bytes())?;
        log_export("samples-txt", &path.display().to_string());
        Ok(path)
    }

    /// Export a bootstrap interval as JSON
    pub fn export_interval_json(&self, interval: &ContourInterval) -> Result<PathBuf> {
        let path = self.output_path(&format!(
            "{}_{}_interval.json",
            sanitize_filename(&interval.station_id),
            sanitize_filename(&interval.method)
        ));
        write_with_parents(&path, &serde_json::to_vec_pretty(interval)?)?;
        log_export("interval-json", &path.display().to_string());
        Ok(path)
    }
}

fn bad_field(path: &Path, line_no: usize, field: &str) -> SeastateError {
    SeastateError::MalformedTable(format!(
        "{}:{} unparsable {} column",
        path.display(),
        line_no + 1,
        field
    ))
}

fn write_with_parents(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_settings(dir: &Path) -> Settings {
        let mut settings = Settings::default();
        settings.cache.directory = dir.join("cache").display().to_string();
        settings.output.directory = dir.join("out").display().to_string();
        settings
    }

    fn test_buoy() -> Buoy {
        let mut buoy = Buoy::new("46022", DataSource::Ndbc);
        buoy.push_records(vec![
            SeaState::new(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(), 2.5, 11.0),
            SeaState::new(Utc.with_ymd_and_hms(2020, 1, 1, 1, 0, 0).unwrap(), 2.75, 11.5),
        ]);
        buoy
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let archive = ArchiveService::new(test_settings(dir.path()));
        let buoy = test_buoy();

        archive.save_snapshot(&buoy).unwrap();
        let loaded = archive.load_snapshot("46022").unwrap().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.records, buoy.records);
    }

    #[test]
    fn test_missing_snapshot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let archive = ArchiveService::new(test_settings(dir.path()));
        assert!(archive.load_snapshot("46022").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_snapshot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let archive = ArchiveService::new(test_settings(dir.path()));
        let path = archive.snapshot_path("46022");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"{ not json").unwrap();
        assert!(archive.load_snapshot("46022").unwrap().is_none());
    }

    #[test]
    fn test_txt_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let archive = ArchiveService::new(test_settings(dir.path()));
        let buoy = test_buoy();

        archive.save_txt(&buoy).unwrap();
        let loaded = archive.load_txt("46022").unwrap().unwrap();
        assert_eq!(loaded.len(), 2);
        assert!((loaded.records[0].hs - 2.5).abs() < 1e-9);
        assert!((loaded.records[1].te - 11.5).abs() < 1e-9);
    }

    #[test]
    fn test_txt_rejects_short_rows() {
        let dir = tempfile::tempdir().unwrap();
        let archive = ArchiveService::new(test_settings(dir.path()));
        let path = archive.text_path("46022");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "1577836800 2.5\n").unwrap();
        assert!(archive.load_txt("46022").is_err());
    }
}
