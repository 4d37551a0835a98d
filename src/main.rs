//! Seastate analysis pipeline
//!
//! Main application entry point: loads the configured station record (from
//! the local cache or the NDBC archive), computes the return contour with
//! every estimation method, generates long-term analysis samples, applies
//! the breaking steepness correction and exports everything to the output
//! directory.

use anyhow::Context;
use tracing::{error, info, warn};

use seastate::{
    config::Settings,
    contours::{
        self, bootstrap_pca_contour, contour_points_at, ContourMethod, CopulaContourMethod,
        CopulaFamily, NonParametricCopulaMethod, PcaContourMethod, ReturnPeriod,
        RosenblattMethod,
    },
    models::{Buoy, Contour},
    services::{ArchiveService, NdbcClient},
    utils::logging,
    waves, SeastateError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate()?;

    // Initialize logging; the guard must outlive the run
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting {} analysis pipeline...", seastate::info());

    let archive = ArchiveService::new(settings.clone());
    let buoy = load_or_fetch(&settings, &archive).await?;
    info!(
        station = %buoy.station_id,
        records = buoy.len(),
        span_years = buoy.time_span_years(),
        "Measurement record ready"
    );

    let rp = ReturnPeriod::new(
        settings.analysis.return_period_years,
        settings.analysis.sea_state_duration_hours,
    )?;
    contours::check_extrapolation(&buoy, &rp);

    // PCA first: it also hosts sampling and the steepness-corrected export
    let pca = PcaContourMethod::fit(&buoy, settings.analysis.pca_bin_size)?;
    let pca_contour = pca.contour(&rp, settings.analysis.n_angles)?;
    export_contour(&archive, &pca_contour);

    for family in [CopulaFamily::Gaussian, CopulaFamily::Gumbel, CopulaFamily::Clayton] {
        run_method(
            &archive,
            &rp,
            &settings,
            CopulaContourMethod::fit(&buoy, family, settings.analysis.copula_bin_size),
        );
        run_method(
            &archive,
            &rp,
            &settings,
            NonParametricCopulaMethod::fit(&buoy, family),
        );
    }
    run_method(
        &archive,
        &rp,
        &settings,
        RosenblattMethod::fit(&buoy, settings.analysis.copula_bin_size),
    );

    // Full sea state samples for long-term analysis
    let sampling = &settings.analysis.sampling;
    let samples = pca.full_sea_state_samples(
        sampling.points_per_band,
        &sampling.band_return_periods,
        settings.analysis.sea_state_duration_hours,
        sampling.seed,
    )?;
    archive.export_samples_json(&samples)?;
    archive.export_samples_txt(&samples)?;

    // Contour approach samples straight off the PCA contour
    let approach = contour_points_at(&pca_contour, &sampling.contour_approach_periods);
    info!(
        points = approach.len(),
        requested = sampling.contour_approach_periods.len(),
        "Contour approach points interpolated"
    );

    // Breaking steepness correction of the PCA contour
    match resolve_depth(&settings, &buoy) {
        Ok(depth) => {
            let corrected = waves::apply_steepness_correction(
                &pca_contour,
                settings.analysis.steepness.max_steepness,
                depth,
            )?;
            export_contour(&archive, &corrected.contour);
        }
        Err(e) => warn!(error = %e, "Skipping steepness correction"),
    }

    // Bootstrap interval; off by default for run time
    if settings.analysis.bootstrap.enabled {
        let interval = bootstrap_pca_contour(
            &buoy,
            &rp,
            settings.analysis.n_angles,
            settings.analysis.pca_bin_size,
            settings.analysis.bootstrap.resamples,
            settings.analysis.bootstrap.confidence,
            settings.analysis.bootstrap.seed,
        )?;
        archive.export_interval_json(&interval)?;
    }

    info!("Analysis pipeline finished.");

    Ok(())
}

/// Load the station record from the snapshot cache, falling back to the text
/// cache and finally to a fresh NDBC fetch
async fn load_or_fetch(settings: &Settings, archive: &ArchiveService) -> anyhow::Result<Buoy> {
    let station_id = &settings.station.id;

    if let Some(buoy) = archive.load_snapshot(station_id)? {
        info!(station = %station_id, "Using snapshot cache");
        return Ok(buoy);
    }
    if let Some(buoy) = archive.load_txt(station_id)? {
        info!(station = %station_id, "Using text cache");
        return Ok(buoy);
    }

    info!(station = %station_id, "No cache found, fetching from NDBC");
    let client = NdbcClient::new(settings.clone())?;
    let buoy = client.fetch_buoy(station_id).await?;

    if settings.cache.snapshot {
        archive.save_snapshot(&buoy)?;
    }
    if settings.cache.text {
        archive.save_txt(&buoy)?;
    }

    Ok(buoy)
}

/// Water depth for the steepness correction: explicit configuration first,
/// station metadata second
fn resolve_depth(settings: &Settings, buoy: &Buoy) -> Result<f64, SeastateError> {
    if let Some(depth) = settings.analysis.steepness.depth {
        return Ok(depth);
    }
    buoy.metadata
        .as_ref()
        .and_then(|m| m.water_depth_m)
        .ok_or_else(|| SeastateError::DepthUnavailable {
            station: buoy.station_id.clone(),
        })
}

/// Fit a contour method and export its contour, logging failures without
/// stopping the remaining methods
fn run_method<M: ContourMethod>(
    archive: &ArchiveService,
    rp: &ReturnPeriod,
    settings: &Settings,
    fitted: Result<M, SeastateError>,
) {
    let method = match fitted {
        Ok(method) => method,
        Err(e) => {
            error!(error = %e, "Contour method fit failed");
            return;
        }
    };
    match method.contour(rp, settings.analysis.n_angles) {
        Ok(contour) => export_contour(archive, &contour),
        Err(e) => error!(method = method.name(), error = %e, "Contour trace failed"),
    }
}

fn export_contour(archive: &ArchiveService, contour: &Contour) {
    if let Err(e) = archive.export_contour_json(contour) {
        error!(method = %contour.method, error = %e, "Contour JSON export failed");
    }
    if let Err(e) = archive.export_contour_txt(contour) {
        error!(method = %contour.method, error = %e, "Contour text export failed");
    }
}
