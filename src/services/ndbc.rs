//! NDBC archive client
//!
//! This service handles data acquisition from the NDBC website: discovery of
//! a station's historical spectral wave density files, yearly downloads with
//! bounded concurrency, and station metadata (water depth, coordinates)
//! lookup. Responses are parsed into typed models; transport failures map
//! into [`NdbcError`].

use std::time::Duration;

use futures::{stream, StreamExt};
use regex::Regex;
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use super::spectra;
use crate::config::Settings;
use crate::models::{Buoy, DataSource, StationMetadata};
use crate::utils::errors::{NdbcError, Result, SeastateError};

/// Client for the NDBC measurement archive
#[derive(Debug, Clone)]
pub struct NdbcClient {
    client: Client,
    settings: Settings,
}

/// A yearly spectral density file discovered on the station history page
#[derive(Debug, Clone, PartialEq, Eq)]
struct SpectralFile {
    filename: String,
    year: u16,
}

impl NdbcClient {
    /// Create a new NdbcClient instance
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.fetch.timeout_seconds))
            .user_agent(settings.fetch.user_agent.clone())
            .build()
            .map_err(SeastateError::Http)?;

        Ok(Self { client, settings })
    }

    /// Fetch the station's full historical record as a buoy series
    ///
    /// Years that fail to download or parse are skipped with a warning; an
    /// archive with no usable year at all is an error.
    pub async fn fetch_buoy(&self, station_id: &str) -> Result<Buoy> {
        info!(station = station_id, "Fetching NDBC spectral archive");

        let files = self.discover_spectral_files(station_id).await?;
        info!(
            station = station_id,
            years = files.len(),
            "Discovered spectral density files"
        );

        let results: Vec<(u16, Result<Vec<crate::models::SeaState>>)> =
            stream::iter(files.into_iter().map(|file| async move {
                let year = file.year;
                (year, self.download_year(&file).await)
            }))
            .buffer_unordered(self.settings.fetch.max_concurrent_downloads)
            .collect()
            .await;

        let mut buoy = Buoy::new(station_id, DataSource::Ndbc);
        let mut skipped_years = 0;
        for (year, result) in results {
            match result {
                Ok(records) => {
                    debug!(station = station_id, year = year, records = records.len(), "Year parsed");
                    buoy.push_records(records);
                }
                Err(e) => {
                    warn!(station = station_id, year = year, error = %e, "Skipping year");
                    skipped_years += 1;
                }
            }
        }

        if buoy.is_empty() {
            return Err(SeastateError::EmptyRecord {
                station: station_id.to_string(),
            });
        }

        crate::utils::logging::log_fetch_result(station_id, buoy.len(), skipped_years);

        match self.fetch_station_metadata(station_id).await {
            Ok(metadata) => buoy.metadata = Some(metadata),
            Err(e) => warn!(station = station_id, error = %e, "Station metadata unavailable"),
        }

        Ok(buoy)
    }

    /// Discover yearly spectral density files on the station history page
    async fn discover_spectral_files(&self, station_id: &str) -> Result<Vec<SpectralFile>> {
        let url = self.build_url(
            "station_history.php",
            &[("station", station_id)],
        )?;
        let page = self.get_text(url).await?;

        let link_re = Regex::new(
            r"filename=([0-9a-zA-Z]+w(\d{4})\.txt\.gz)[^'\x22]*dir=data/historical/swden/",
        )?;

        let prefix = station_id.to_lowercase();
        let mut files: Vec<SpectralFile> = link_re
            .captures_iter(&page)
            .filter_map(|caps| {
                let filename = caps.get(1)?.as_str().to_string();
                let year: u16 = caps.get(2)?.as_str().parse().ok()?;
                filename
                    .to_lowercase()
                    .starts_with(&prefix)
                    .then_some(SpectralFile { filename, year })
            })
            .collect();
        files.sort_by_key(|f| f.year);
        files.dedup();

        if files.is_empty() {
            return Err(NdbcError::NoDataFiles {
                station: station_id.to_string(),
            }
            .into());
        }

        Ok(files)
    }

    /// Download and parse one yearly spectral density file
    async fn download_year(&self, file: &SpectralFile) -> Result<Vec<crate::models::SeaState>> {
        // view_text_file.php serves the gzipped archive as plain text
        let url = self.build_url(
            "view_text_file.php",
            &[
                ("filename", file.filename.as_str()),
                ("dir", "data/historical/swden/"),
            ],
        )?;
        let text = self.get_text(url).await?;
        let parsed = spectra::parse_spectral_table(&text)?;
        if parsed.skipped_rows > 0 {
            debug!(
                filename = %file.filename,
                skipped_rows = parsed.skipped_rows,
                "Dropped unusable spectra rows"
            );
        }
        Ok(parsed.records)
    }

    /// Fetch water depth and coordinates from the station page
    pub async fn fetch_station_metadata(&self, station_id: &str) -> Result<StationMetadata> {
        let url = self.build_url("station_page.php", &[("station", station_id)])?;
        let page = self.get_text(url).await?;

        let depth_re = Regex::new(r"Water depth:\s*([0-9]+(?:\.[0-9]+)?)\s*m")?;
        let water_depth_m = depth_re
            .captures(&page)
            .and_then(|caps| caps.get(1)?.as_str().parse::<f64>().ok());

        let coord_re = Regex::new(
            r"([0-9]+(?:\.[0-9]+)?)\s*([NS])\s+([0-9]+(?:\.[0-9]+)?)\s*([EW])",
        )?;
        let (latitude, longitude) = match coord_re.captures(&page) {
            Some(caps) => {
                let lat: Option<f64> = caps.get(1).and_then(|m| m.as_str().parse().ok());
                let lon: Option<f64> = caps.get(3).and_then(|m| m.as_str().parse().ok());
                let lat = lat.map(|v| if &caps[2] == "S" { -v } else { v });
                let lon = lon.map(|v| if &caps[4] == "W" { -v } else { v });
                (lat, lon)
            }
            None => (None, None),
        };

        if water_depth_m.is_none() {
            warn!(station = station_id, "Station page lists no water depth");
        }

        Ok(StationMetadata {
            water_depth_m,
            latitude,
            longitude,
            label: None,
        })
    }

    fn build_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&self.settings.fetch.base_url)?.join(path)?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    /// GET a page, mapping transport failures into NDBC error variants
    async fn get_text(&self, url: Url) -> Result<String> {
        debug!(url = %url, "NDBC request");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                SeastateError::Ndbc(NdbcError::Timeout)
            } else if e.is_connect() {
                SeastateError::Ndbc(NdbcError::ServiceUnavailable)
            } else {
                SeastateError::Ndbc(NdbcError::RequestFailed(e.to_string()))
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(SeastateError::Ndbc(NdbcError::RequestFailed(format!(
                "HTTP {}",
                status
            ))));
        }

        response
            .text()
            .await
            .map_err(|e| SeastateError::Ndbc(NdbcError::InvalidResponse(e.to_string())))
    }
}
