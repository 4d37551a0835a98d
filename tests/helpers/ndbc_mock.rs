//! Mock NDBC website for testing
//!
//! This module provides a mock HTTP server that simulates the NDBC station
//! history, text file and station pages. It uses wiremock to create
//! configurable mock responses.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock NDBC website for testing
pub struct NdbcMockServer {
    pub server: MockServer,
}

impl NdbcMockServer {
    /// Create a new mock NDBC server
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Serve a station history page listing the given spectral files
    pub async fn mock_station_history(&self, station: &str, filenames: &[&str]) {
        let links: String = filenames
            .iter()
            .map(|f| {
                format!(
                    r#"<a href="/download_data.php?filename={}&dir=data/historical/swden/">{}</a>"#,
                    f, f
                )
            })
            .collect();
        let html = format!("<html><body>{}</body></html>", links);

        Mock::given(method("GET"))
            .and(path("/station_history.php"))
            .and(query_param("station", station))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .mount(&self.server)
            .await;
    }

    /// Serve one yearly spectral density table
    pub async fn mock_spectral_file(&self, filename: &str, table: &str) {
        Mock::given(method("GET"))
            .and(path("/view_text_file.php"))
            .and(query_param("filename", filename))
            .and(query_param("dir", "data/historical/swden/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(table.to_string()))
            .mount(&self.server)
            .await;
    }

    /// Serve a station page with the given water depth
    pub async fn mock_station_page(&self, station: &str, depth_m: f64) {
        let html = format!(
            "<html><body><b>40.749 N 124.527 W</b><p>Water depth: {} m</p></body></html>",
            depth_m
        );
        Mock::given(method("GET"))
            .and(path("/station_page.php"))
            .and(query_param("station", station))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .mount(&self.server)
            .await;
    }

    /// Serve an empty station history page (no spectral files)
    pub async fn mock_empty_station_history(&self, station: &str) {
        Mock::given(method("GET"))
            .and(path("/station_history.php"))
            .and(query_param("station", station))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("<html><body></body></html>"),
            )
            .mount(&self.server)
            .await;
    }
}
