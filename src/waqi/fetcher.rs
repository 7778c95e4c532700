//! Pollutant fetcher backed by the WAQI map-bounds endpoint.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::FetchError;
use crate::model::{mean, BoundingBox, Pollutant, ReadingSource};
use crate::waqi::client::Client;

/// Averages one pollutant over every station inside a bounding box.
///
/// Stateless apart from the shared client: each call is one HTTP request,
/// with no retries. The sampling cadence takes care of resampling.
pub struct AirQualityFetcher {
    client: Arc<Client>,
    pollutant: Pollutant,
}

impl AirQualityFetcher {
    pub fn new(client: Arc<Client>, pollutant: Pollutant) -> Self {
        Self { client, pollutant }
    }

    pub fn pollutant(&self) -> Pollutant {
        self.pollutant
    }

    /// Same as [`ReadingSource::fetch`] but keeps the failure reason.
    pub async fn fetch_average(&self, bounds: &BoundingBox) -> Result<f64, FetchError> {
        let response = self.client.map_bounds(bounds).await?;
        let values = response.pollutant_values(self.pollutant)?;
        mean(&values).ok_or_else(|| FetchError::no_readings(self.pollutant.key()))
    }
}

#[async_trait]
impl ReadingSource for AirQualityFetcher {
    async fn fetch(&self, bounds: &BoundingBox) -> Option<f64> {
        match self.fetch_average(bounds).await {
            Ok(average) => {
                tracing::debug!(
                    pollutant = %self.pollutant,
                    bounds = %bounds,
                    average,
                    "Fetched reading"
                );
                Some(average)
            }
            Err(e) if e.is_no_data() => {
                tracing::warn!(pollutant = %self.pollutant, bounds = %bounds, "{}", e);
                None
            }
            Err(e) => {
                tracing::error!(pollutant = %self.pollutant, "Failed to fetch data: {}", e);
                None
            }
        }
    }
}
