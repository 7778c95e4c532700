use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};

use crate::model::{BoundingBox, ReadingSource, SamplingStatus, StatusSnapshot};
use crate::sampler::cancel::CancelSignal;
use crate::sampler::plan::SamplingPlan;
use crate::sampler::session::SamplingSession;

/// Start/stop/status surface over one background sampling session.
///
/// At most one session runs per controller. The session state (published
/// snapshot, cancel signal) lives for the whole life of the controller and
/// is reset in place on every [`start`](Self::start).
///
/// Redundant calls (`start` while running, `stop` while not running) are
/// logged and otherwise ignored.
pub struct SamplingController {
    source: Arc<dyn ReadingSource>,
    tick_unit: Duration,
    state: Arc<watch::Sender<StatusSnapshot>>,
    cancel: Arc<CancelSignal>,
    task: Option<JoinHandle<()>>,
}

impl SamplingController {
    /// Creates an idle controller. `tick_unit` is the time unit a
    /// [`SamplingPlan`] period is expressed in (one minute in production).
    pub fn new(source: Arc<dyn ReadingSource>, tick_unit: Duration) -> Self {
        let (state, _) = watch::channel(StatusSnapshot::idle());
        Self {
            source,
            tick_unit,
            state: Arc::new(state),
            cancel: Arc::new(CancelSignal::new()),
            task: None,
        }
    }

    /// Current snapshot. Never blocks on the sampling task.
    pub fn status(&self) -> StatusSnapshot {
        *self.state.borrow()
    }

    pub fn is_running(&self) -> bool {
        self.status().status() == SamplingStatus::Running
    }

    /// Receiver that observes every snapshot the session publishes.
    pub fn subscribe(&self) -> watch::Receiver<StatusSnapshot> {
        self.state.subscribe()
    }

    /// Waits until the current session, if any, has ended and returns its
    /// final snapshot.
    pub async fn wait(&self) -> StatusSnapshot {
        let mut receiver = self.state.subscribe();
        let snapshot = match receiver
            .wait_for(|snapshot| snapshot.status() != SamplingStatus::Running)
            .await
        {
            Ok(snapshot) => *snapshot,
            Err(_) => self.status(),
        };
        snapshot
    }

    /// Launches a new session over `bounds` and returns immediately.
    ///
    /// No-op while a session is already running.
    ///
    /// # Panics
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self, bounds: BoundingBox, plan: SamplingPlan) {
        if self.is_running() {
            tracing::warn!("Sampling is already running.");
            return;
        }

        if let Some(previous) = self.task.take() {
            // the previous session already published its terminal state;
            // collect its exit without holding up this call
            tokio::spawn(async move {
                handle_task_result(previous.await);
            });
        }

        self.cancel.reset();
        let total_ticks = plan.total_ticks();
        let interval = plan.interval(self.tick_unit);
        // any previous session has already written its last snapshot
        self.state.send_replace(StatusSnapshot::running(0, 0));

        let session = SamplingSession {
            source: Arc::clone(&self.source),
            bounds,
            total_ticks,
            interval,
            state: Arc::clone(&self.state),
            cancel: Arc::clone(&self.cancel),
        };
        self.task = Some(tokio::spawn(session.run()));
        tracing::info!(
            bounds = %bounds,
            total_ticks,
            interval = ?interval,
            "Sampling started."
        );
    }

    /// Requests cancellation and waits for the session task to exit.
    ///
    /// When this returns after a running session, the status is terminal
    /// (`Stopped`, or `Failed` if the task crashed) and will not change
    /// again. There is no timeout: the inter-tick sleep wakes on cancel, so
    /// the wait is bounded by the one fetch in flight, and fetches carry
    /// their own timeout.
    ///
    /// A session that already ended is not touched, but its task is still
    /// joined so a crash gets logged.
    pub async fn stop(&mut self) {
        // raise the flag before looking at the status; the session makes its
        // final decision under the same lock the status is read with
        self.cancel.cancel();
        let was_running = self.is_running();
        if !was_running {
            tracing::warn!("No active sampling to stop.");
        }

        if let Some(task) = self.task.take() {
            handle_task_result(task.await);
        }
        if was_running {
            tracing::info!(status = %self.status().status(), "Sampling stopped.");
        }
    }
}

impl Drop for SamplingController {
    fn drop(&mut self) {
        if self.is_running() {
            self.cancel.cancel();
        }
    }
}

/// Logs how the session task ended and returns whether it exited cleanly.
/// Panics are already reflected in the published status by the session.
fn handle_task_result(result: Result<(), JoinError>) -> bool {
    match result {
        Ok(_) => {
            tracing::debug!("Sampling task completed.");
            true
        }
        Err(e) => {
            tracing::error!("Sampling task failed: {:?}", e);
            false
        }
    }
}
