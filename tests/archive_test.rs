//! Integration tests for the local archive: cache round trips and result
//! exports on a temp directory.

mod helpers;

use helpers::{init_test_env, synthetic_buoy, test_settings};
use seastate::models::{Contour, ContourPoint, Sample, SampleSet};
use seastate::ArchiveService;

#[test]
fn test_snapshot_and_txt_caches_agree() {
    init_test_env();
    let dir = tempfile::tempdir().unwrap();
    let settings = test_settings("http://unused.invalid", dir.path());
    let archive = ArchiveService::new(settings);

    let buoy = synthetic_buoy(500);
    archive.save_snapshot(&buoy).unwrap();
    archive.save_txt(&buoy).unwrap();

    let from_snapshot = archive.load_snapshot("T0001").unwrap().unwrap();
    let from_txt = archive.load_txt("T0001").unwrap().unwrap();

    assert_eq!(from_snapshot.len(), buoy.len());
    assert_eq!(from_txt.len(), buoy.len());
    for (a, b) in from_snapshot.records.iter().zip(&from_txt.records) {
        assert_eq!(a.time, b.time);
        // the text table rounds to four decimals
        assert!((a.hs - b.hs).abs() < 1e-4);
        assert!((a.te - b.te).abs() < 1e-4);
    }
}

#[test]
fn test_contour_export_files_are_self_describing() {
    init_test_env();
    let dir = tempfile::tempdir().unwrap();
    let settings = test_settings("http://unused.invalid", dir.path());
    let archive = ArchiveService::new(settings);

    let contour = Contour {
        method: "gumbel-copula".to_string(),
        station_id: "46022".to_string(),
        return_period_years: 100.0,
        sea_state_duration_hours: 1.0,
        points: vec![
            ContourPoint { te: 10.0, hs: 5.0 },
            ContourPoint { te: 12.0, hs: 6.5 },
        ],
    };

    let json_path = archive.export_contour_json(&contour).unwrap();
    let txt_path = archive.export_contour_txt(&contour).unwrap();
    assert!(json_path.ends_with("46022_gumbel-copula_contour.json"));
    assert!(txt_path.ends_with("46022_gumbel-copula_contour.txt"));

    let loaded: Contour =
        serde_json::from_slice(&std::fs::read(&json_path).unwrap()).unwrap();
    assert_eq!(loaded.method, contour.method);
    assert_eq!(loaded.return_period_years, 100.0);
    assert_eq!(loaded.points.len(), 2);

    let text = std::fs::read_to_string(&txt_path).unwrap();
    assert!(text.starts_with('#'));
    assert!(text.contains("10.0000 5.0000"));
}

#[test]
fn test_sample_export_round_trip() {
    init_test_env();
    let dir = tempfile::tempdir().unwrap();
    let settings = test_settings("http://unused.invalid", dir.path());
    let archive = ArchiveService::new(settings);

    let samples = SampleSet {
        station_id: "46022".to_string(),
        seed: 2,
        band_return_periods: vec![1.0, 10.0, 100.0],
        samples: vec![
            Sample { te: 11.0, hs: 4.0, weight: 0.25 },
            Sample { te: 13.0, hs: 5.0, weight: 0.25 },
        ],
    };

    let json_path = archive.export_samples_json(&samples).unwrap();
    archive.export_samples_txt(&samples).unwrap();

    let loaded: SampleSet =
        serde_json::from_slice(&std::fs::read(&json_path).unwrap()).unwrap();
    assert_eq!(loaded.samples.len(), 2);
    assert!((loaded.total_weight() - 0.5).abs() < 1e-12);
}
