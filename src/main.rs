//! Air quality sampler
//!
//! Runs a single sampling session over the configured bounding box and logs
//! the result.
//!
//! # Configuration
//!
//! - `LOG_LEVEL`
//! - `WAQI_TOKEN` (required), `WAQI_URL`, `WAQI_TIMEOUT_SEC`, `WAQI_POLLUTANT`
//! - `SAMPLER_PERIOD`, `SAMPLER_RATE`, `SAMPLER_TICK_UNIT_SEC`
//! - `BOUNDS_LAT1`, `BOUNDS_LON1`, `BOUNDS_LAT2`, `BOUNDS_LON2` (required)
//!
//! SIGTERM or Ctrl-C stops the session early.

use air_quality_sampler::config;
use air_quality_sampler::waqi::{AirQualityFetcher, Client};
use air_quality_sampler::{SamplingController, SamplingStatus, StatusSnapshot};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::signal::ctrl_c;
use tokio::signal::unix::{signal, SignalKind};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let app_config = config::load_app_config()?;
    tracing_subscriber::fmt()
        .with_max_level(app_config.log_level())
        .init();

    let waqi_config = config::load_waqi_config()?;
    let sampler_config = config::load_sampler_config()?;
    let bounds = config::load_bounds_config()?.bounding_box();

    let pollutant = waqi_config.pollutant()?;
    let client = Arc::new(Client::new(waqi_config)?);
    let fetcher = Arc::new(AirQualityFetcher::new(client, pollutant));

    let mut controller = SamplingController::new(fetcher, sampler_config.tick_unit());
    let mut updates = controller.subscribe();
    controller.start(bounds, sampler_config.plan());

    let mut sig_term = signal(SignalKind::terminate())?;
    tracing::info!("Sampling {} over {}. Press Ctrl-C or send SIGTERM to stop.", pollutant, bounds);
    loop {
        tokio::select! {
            _ = sig_term.recv() => {
                tracing::info!("Received SIGTERM. Stopping...");
                controller.stop().await;
            }
            _ = ctrl_c() => {
                tracing::info!("Received SIGINT. Stopping...");
                controller.stop().await;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = *updates.borrow_and_update();
                log_progress(&snapshot, sampler_config.plan().total_ticks());
                if snapshot.status().is_terminal() {
                    break;
                }
            }
        }
    }

    let (status, average) = controller.status().as_pair();
    match average {
        Some(average) => {
            tracing::info!("Final status: {}, average {}: {:.2}", status, pollutant, average)
        }
        None => tracing::info!("Final status: {}", status),
    }
    Ok(if status == SamplingStatus::Failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn log_progress(snapshot: &StatusSnapshot, total_ticks: u64) {
    if snapshot.status() == SamplingStatus::Running && snapshot.ticks_completed() > 0 {
        tracing::info!(
            "Tick {}/{}: {} readings so far",
            snapshot.ticks_completed(),
            total_ticks,
            snapshot.readings_collected()
        );
    }
}
