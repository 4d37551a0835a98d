//! Integration tests for the NDBC fetch path
//!
//! Exercises link discovery, yearly downloads, spectral reduction and
//! metadata lookup against a mock NDBC website.

mod helpers;

use assert_matches::assert_matches;
use helpers::{init_test_env, test_settings, NdbcMockServer};
use seastate::utils::errors::{NdbcError, SeastateError};
use seastate::NdbcClient;

const TABLE_2018: &str = "\
#YY  MM DD hh mm   .0500  .1000  .1500
2018 01 01 00 00   1.20   0.80   0.40
2018 01 01 01 00   1.10   0.90   0.50
2018 01 01 02 00 999.00 999.00 999.00
";

const TABLE_2019: &str = "\
#YY  MM DD hh mm   .0500  .1000  .1500
2019 01 01 00 00   2.00   1.50   0.70
2019 01 01 01 00   0.00   0.00   0.00
2019 01 01 02 00   1.80   1.40   0.60
";

#[tokio::test]
async fn test_fetch_buoy_parses_all_years() {
    init_test_env();
    let mock = NdbcMockServer::new().await;
    mock.mock_station_history("46022", &["46022w2018.txt.gz", "46022w2019.txt.gz"])
        .await;
    mock.mock_spectral_file("46022w2018.txt.gz", TABLE_2018).await;
    mock.mock_spectral_file("46022w2019.txt.gz", TABLE_2019).await;
    mock.mock_station_page("46022", 391.4).await;

    let dir = tempfile::tempdir().unwrap();
    let settings = test_settings(&mock.uri(), dir.path());
    let client = NdbcClient::new(settings).unwrap();

    let buoy = client.fetch_buoy("46022").await.unwrap();

    // 2 usable rows from 2018 + 2 from 2019; sentinel and zero spectra dropped
    assert_eq!(buoy.len(), 4);
    assert!(buoy.records.windows(2).all(|w| w[0].time < w[1].time));
    assert!(buoy.records.iter().all(|r| r.hs > 0.0 && r.te > 0.0));

    let metadata = buoy.metadata.unwrap();
    assert_eq!(metadata.water_depth_m, Some(391.4));
    assert_eq!(metadata.latitude, Some(40.749));
    assert_eq!(metadata.longitude, Some(-124.527));
}

#[tokio::test]
async fn test_fetch_survives_one_broken_year() {
    init_test_env();
    let mock = NdbcMockServer::new().await;
    mock.mock_station_history("46022", &["46022w2018.txt.gz", "46022w2019.txt.gz"])
        .await;
    mock.mock_spectral_file("46022w2018.txt.gz", "garbage, not a table").await;
    mock.mock_spectral_file("46022w2019.txt.gz", TABLE_2019).await;
    mock.mock_station_page("46022", 391.4).await;

    let dir = tempfile::tempdir().unwrap();
    let settings = test_settings(&mock.uri(), dir.path());
    let client = NdbcClient::new(settings).unwrap();

    let buoy = client.fetch_buoy("46022").await.unwrap();
    assert_eq!(buoy.len(), 2);
}

#[tokio::test]
async fn test_station_without_files_is_an_error() {
    init_test_env();
    let mock = NdbcMockServer::new().await;
    mock.mock_empty_station_history("99999").await;

    let dir = tempfile::tempdir().unwrap();
    let settings = test_settings(&mock.uri(), dir.path());
    let client = NdbcClient::new(settings).unwrap();

    let err = client.fetch_buoy("99999").await.unwrap_err();
    assert_matches!(
        err,
        SeastateError::Ndbc(NdbcError::NoDataFiles { station }) if station == "99999"
    );
}

#[tokio::test]
async fn test_metadata_lookup_alone() {
    init_test_env();
    let mock = NdbcMockServer::new().await;
    mock.mock_station_page("46022", 120.5).await;

    let dir = tempfile::tempdir().unwrap();
    let settings = test_settings(&mock.uri(), dir.path());
    let client = NdbcClient::new(settings).unwrap();

    let metadata = client.fetch_station_metadata("46022").await.unwrap();
    assert_eq!(metadata.water_depth_m, Some(120.5));
}
