use chrono::Local;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::model::{mean, BoundingBox, ReadingSource, SampleReading, SamplingStatus, StatusSnapshot};
use crate::sampler::cancel::CancelSignal;

/// Everything the background task needs for one session.
///
/// While the task runs it is the only writer of the published snapshot.
pub(crate) struct SamplingSession {
    pub source: Arc<dyn ReadingSource>,
    pub bounds: BoundingBox,
    pub total_ticks: u64,
    pub interval: Duration,
    pub state: Arc<watch::Sender<StatusSnapshot>>,
    pub cancel: Arc<CancelSignal>,
}

impl SamplingSession {
    /// Runs the tick loop to completion or cancellation and publishes the
    /// terminal snapshot.
    pub async fn run(self) {
        let mut guard = CrashGuard {
            state: Arc::clone(&self.state),
            armed: true,
        };
        let mut readings: Vec<SampleReading> = Vec::new();
        let mut ticks_completed: u64 = 0;

        for tick in 1..=self.total_ticks {
            if self.cancel.is_cancelled() {
                break;
            }

            if let Some(value) = self.source.fetch(&self.bounds).await {
                readings.push(SampleReading::new(value, Local::now()));
            }
            ticks_completed = tick;
            tracing::debug!(
                tick,
                total_ticks = self.total_ticks,
                readings = readings.len(),
                "Tick completed"
            );
            self.state
                .send_replace(StatusSnapshot::running(ticks_completed, readings.len()));

            if tick < self.total_ticks {
                self.cancel.sleep(self.interval).await;
            }
        }

        self.finish(ticks_completed, &readings);
        guard.armed = false;
    }

    fn finish(&self, ticks_completed: u64, readings: &[SampleReading]) {
        let values: Vec<f64> = readings.iter().map(|r| r.value).collect();
        let average = mean(&values);

        // decide under the channel's write lock so a stop() that saw Running
        // is guaranteed to find the cancel flag raised here
        let mut result = StatusSnapshot::idle();
        self.state.send_modify(|snapshot| {
            *snapshot = if self.cancel.is_cancelled() {
                StatusSnapshot::stopped(ticks_completed, readings.len())
            } else {
                match average {
                    Some(average) => StatusSnapshot::done(average, ticks_completed, readings.len()),
                    None => StatusSnapshot::failed(ticks_completed),
                }
            };
            result = *snapshot;
        });

        match result.status() {
            SamplingStatus::Stopped => {
                tracing::info!(ticks_completed, "Sampling stopped by user.");
            }
            SamplingStatus::Done => {
                let first = readings.first().map(|r| r.taken_at.format("%H:%M:%S").to_string());
                let last = readings.last().map(|r| r.taken_at.format("%H:%M:%S").to_string());
                tracing::info!(
                    average = result.average(),
                    readings = readings.len(),
                    ticks_completed,
                    first = first.as_deref().unwrap_or("-"),
                    last = last.as_deref().unwrap_or("-"),
                    "Sampling completed."
                );
            }
            _ => {
                tracing::error!(ticks_completed, "No valid samples collected.");
            }
        }
    }
}

/// Marks the session `Failed` if the task unwinds before publishing a
/// terminal snapshot, so a panicking source can never leave the controller
/// stuck in `Running`. Disarmed once the session has finished, since by then
/// a `Running` status belongs to the next session.
struct CrashGuard {
    state: Arc<watch::Sender<StatusSnapshot>>,
    armed: bool,
}

impl Drop for CrashGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.state.send_if_modified(|snapshot| {
            if snapshot.status() != SamplingStatus::Running {
                return false;
            }
            tracing::error!("Sampling task exited without a result");
            *snapshot = StatusSnapshot::failed(snapshot.ticks_completed());
            true
        });
    }
}
