//! End-to-end contour pipeline on a synthetic record
//!
//! Fits every estimation method on the same deterministic series, traces the
//! 100-year contour, draws samples, applies the steepness correction and
//! bootstraps an interval, checking the cross-method invariants a real
//! analysis relies on.

mod helpers;

use helpers::{init_test_env, synthetic_buoy};
use seastate::contours::{
    bootstrap_pca_contour, contour_points_at, ContourMethod, CopulaContourMethod, CopulaFamily,
    NonParametricCopulaMethod, PcaContourMethod, ReturnPeriod, RosenblattMethod,
};
use seastate::waves;

const N_ANGLES: usize = 60;

fn all_contours() -> Vec<seastate::Contour> {
    let buoy = synthetic_buoy(3000);
    let rp = ReturnPeriod::new(100.0, 1.0).unwrap();

    let mut contours = Vec::new();
    let pca = PcaContourMethod::fit(&buoy, 250).unwrap();
    contours.push(pca.contour(&rp, N_ANGLES).unwrap());
    for family in [CopulaFamily::Gaussian, CopulaFamily::Gumbel, CopulaFamily::Clayton] {
        let parametric = CopulaContourMethod::fit(&buoy, family, 100).unwrap();
        contours.push(parametric.contour(&rp, N_ANGLES).unwrap());
        let nonparametric = NonParametricCopulaMethod::fit(&buoy, family).unwrap();
        contours.push(nonparametric.contour(&rp, N_ANGLES).unwrap());
    }
    let rosenblatt = RosenblattMethod::fit(&buoy, 100).unwrap();
    contours.push(rosenblatt.contour(&rp, N_ANGLES).unwrap());

    contours
}

#[test]
fn test_every_method_produces_a_physical_contour() {
    init_test_env();
    let contours = all_contours();
    assert_eq!(contours.len(), 8);

    let names: Vec<&str> = contours.iter().map(|c| c.method.as_str()).collect();
    assert!(names.contains(&"pca"));
    assert!(names.contains(&"gaussian-copula"));
    assert!(names.contains(&"nonparametric-clayton-copula"));
    assert!(names.contains(&"rosenblatt"));

    for contour in &contours {
        assert!(
            !contour.points.is_empty(),
            "{} produced an empty contour",
            contour.method
        );
        assert!(
            contour
                .points
                .iter()
                .all(|p| p.hs.is_finite() && p.te.is_finite() && p.hs > 0.0 && p.te > 0.0),
            "{} produced unphysical points",
            contour.method
        );
    }
}

#[test]
fn test_parametric_methods_agree_on_magnitude() {
    init_test_env();
    let buoy = synthetic_buoy(3000);
    let max_obs = buoy.hs().into_iter().fold(f64::NEG_INFINITY, f64::max);

    let contours = all_contours();
    for contour in &contours {
        let max_hs = contour.max_hs().unwrap();
        // non-parametric marginals stay near the data; parametric tails may
        // extrapolate past it, but never absurdly for a 100-year level
        assert!(
            max_hs > 0.4 * max_obs && max_hs < 12.0 * max_obs,
            "{} peak hs {} vs observed {}",
            contour.method,
            max_hs,
            max_obs
        );
    }
}

#[test]
fn test_longer_return_periods_reach_higher() {
    init_test_env();
    let buoy = synthetic_buoy(3000);
    let pca = PcaContourMethod::fit(&buoy, 250).unwrap();

    let rp10 = ReturnPeriod::new(10.0, 1.0).unwrap();
    let rp100 = ReturnPeriod::new(100.0, 1.0).unwrap();
    let c10 = pca.contour(&rp10, N_ANGLES).unwrap().max_hs().unwrap();
    let c100 = pca.contour(&rp100, N_ANGLES).unwrap().max_hs().unwrap();
    assert!(c100 > c10, "100-year {} vs 10-year {}", c100, c10);
}

#[test]
fn test_sampling_and_contour_approach() {
    init_test_env();
    let buoy = synthetic_buoy(3000);
    let pca = PcaContourMethod::fit(&buoy, 250).unwrap();
    let rp = ReturnPeriod::new(100.0, 1.0).unwrap();
    let contour = pca.contour(&rp, 200).unwrap();

    let bands = [0.5, 1.0, 5.0, 10.0, 50.0, 100.0];
    let samples = pca.full_sea_state_samples(20, &bands, 1.0, 2).unwrap();
    // unphysical draws on the lower branch may be dropped
    assert!(samples.samples.len() <= 20 * (bands.len() - 1));
    assert!(samples.samples.len() > 2 * (bands.len() - 1));
    assert!(samples.samples.iter().all(|s| s.weight > 0.0));

    // samples live inside the outermost return level
    let outer_max = contour.max_hs().unwrap();
    assert!(samples.samples.iter().all(|s| s.hs < outer_max * 1.5));

    let te_values: Vec<f64> = contour.te_values();
    let mid = 0.5
        * (te_values.iter().copied().fold(f64::INFINITY, f64::min)
            + te_values.iter().copied().fold(f64::NEG_INFINITY, f64::max));
    let approach = contour_points_at(&contour, &[mid]);
    assert_eq!(approach.len(), 1);
    assert!(approach[0].hs > 0.0);
}

#[test]
fn test_steepness_correction_caps_in_shallow_water() {
    init_test_env();
    let buoy = synthetic_buoy(3000);
    let pca = PcaContourMethod::fit(&buoy, 250).unwrap();
    let rp = ReturnPeriod::new(100.0, 1.0).unwrap();
    let contour = pca.contour(&rp, N_ANGLES).unwrap();

    // deep water: a realistic contour stays below the breaking limit
    let deep = waves::apply_steepness_correction(&contour, 0.07, 391.4).unwrap();
    assert!(deep.capped_indices.len() < contour.points.len());
    for (original, corrected) in contour.points.iter().zip(&deep.contour.points) {
        assert!(corrected.hs <= original.hs + 1e-12);
    }

    // very shallow water caps the crest
    let shallow = waves::apply_steepness_correction(&contour, 0.07, 3.0).unwrap();
    assert!(!shallow.capped_indices.is_empty());
    let crest_before = contour.max_hs().unwrap();
    let crest_after = shallow.contour.max_hs().unwrap();
    assert!(crest_after < crest_before);
}

#[test]
fn test_bootstrap_interval_on_pipeline_record() {
    init_test_env();
    let buoy = synthetic_buoy(2000);
    let rp = ReturnPeriod::new(100.0, 1.0).unwrap();

    let interval = bootstrap_pca_contour(&buoy, &rp, 24, 200, 25, 0.9, 42).unwrap();
    assert_eq!(interval.lower.len(), 24);
    assert_eq!(interval.upper.len(), 24);
    assert!(interval.replicates_used > 0);
    for (lo, hi) in interval.lower.iter().zip(&interval.upper) {
        assert!(lo.hs <= hi.hs + 1e-9);
    }
}
