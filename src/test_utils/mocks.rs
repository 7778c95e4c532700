//! Mock reading sources and a mock WAQI server for testing.

use crate::model::{BoundingBox, ReadingSource};
use crate::test_utils::fixtures;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A reading source that replays a fixed script, one entry per call.
///
/// Calls past the end of the script yield `None`.
pub struct ScriptedReadingSource {
    script: Vec<Option<f64>>,
    call_count: Arc<AtomicUsize>,
    delay: Duration,
}

impl ScriptedReadingSource {
    /// Creates a source that replays `script`.
    pub fn new(script: Vec<Option<f64>>) -> Self {
        Self {
            script,
            call_count: Arc::new(AtomicUsize::new(0)),
            delay: Duration::ZERO,
        }
    }

    /// Creates a source that returns `value` forever.
    pub fn constant(value: f64, calls: usize) -> Self {
        Self::new(vec![Some(value); calls])
    }

    /// Creates a source that never has data.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Makes every call take `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Gets the number of times this source has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReadingSource for ScriptedReadingSource {
    async fn fetch(&self, _bounds: &BoundingBox) -> Option<f64> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.script.get(call).copied().flatten()
    }
}

/// A reading source that panics on its first `panics` calls and returns
/// `value` after that.
pub struct PanickingReadingSource {
    panics: usize,
    value: f64,
    call_count: AtomicUsize,
}

impl PanickingReadingSource {
    /// Creates a source whose every call panics.
    pub fn always() -> Self {
        Self::new(usize::MAX, 0.0)
    }

    pub fn new(panics: usize, value: f64) -> Self {
        Self {
            panics,
            value,
            call_count: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ReadingSource for PanickingReadingSource {
    async fn fetch(&self, _bounds: &BoundingBox) -> Option<f64> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst);
        if call < self.panics {
            panic!("reading source blew up");
        }
        Some(self.value)
    }
}

/// A reading source that records the clock at every call and always returns
/// `value`.
pub struct TimedReadingSource {
    value: f64,
    calls: Mutex<Vec<Instant>>,
}

impl TimedReadingSource {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Whole seconds between `origin` and each call.
    pub fn offsets_secs(&self, origin: Instant) -> Vec<u64> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|at| at.duration_since(origin).as_secs())
            .collect()
    }
}

#[async_trait]
impl ReadingSource for TimedReadingSource {
    async fn fetch(&self, _bounds: &BoundingBox) -> Option<f64> {
        self.calls.lock().unwrap().push(Instant::now());
        Some(self.value)
    }
}

/// Builder for creating wiremock servers that mimic the WAQI API.
pub struct MockWaqiServerBuilder {
    server: MockServer,
}

impl MockWaqiServerBuilder {
    /// Creates a new mock server builder.
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Gets the server URL.
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Answers `/map/bounds/` with one PM2.5 station per value.
    pub async fn mock_stations(self, pm25_values: &[f64]) -> Self {
        self.mock_body(200, &fixtures::stations_body(pm25_values)).await
    }

    /// Answers `/map/bounds/` with a raw body and status.
    pub async fn mock_body(self, status: u16, body: &str) -> Self {
        Mock::given(method("GET"))
            .and(path("/map/bounds/"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
        self
    }

    /// Answers `/map/bounds/` with stations, but only after `delay`.
    pub async fn mock_delayed_stations(self, pm25_values: &[f64], delay: Duration) -> Self {
        Mock::given(method("GET"))
            .and(path("/map/bounds/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(fixtures::stations_body(pm25_values))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> BoundingBox {
        BoundingBox::new(0.0, 0.0, 1.0, 1.0)
    }

    #[tokio::test]
    async fn test_scripted_source_replays_then_runs_dry() {
        let source = ScriptedReadingSource::new(vec![Some(1.0), None, Some(3.0)]);

        assert_eq!(source.fetch(&bounds()).await, Some(1.0));
        assert_eq!(source.fetch(&bounds()).await, None);
        assert_eq!(source.fetch(&bounds()).await, Some(3.0));
        assert_eq!(source.fetch(&bounds()).await, None);
        assert_eq!(source.call_count(), 4);
    }

    #[tokio::test]
    async fn test_scripted_source_delay() {
        let source = ScriptedReadingSource::constant(1.0, 1).with_delay(Duration::from_millis(10));

        let start = std::time::Instant::now();
        let _ = source.fetch(&bounds()).await;

        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    #[tokio::test]
    async fn test_panicking_source_recovers_after_its_panics() {
        let source = Arc::new(PanickingReadingSource::new(1, 2.5));

        let first = {
            let source = Arc::clone(&source);
            tokio::spawn(async move { source.fetch(&bounds()).await })
        };
        assert!(first.await.is_err());
        assert_eq!(source.fetch(&bounds()).await, Some(2.5));
    }
}
