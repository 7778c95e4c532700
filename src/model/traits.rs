use async_trait::async_trait;

use super::types::BoundingBox;

/// Source of one aggregated reading per call.
///
/// This is the seam between the sampling loop and the network. Implementors
/// must absorb their own failures: `None` covers both "the API had no data"
/// and "the API could not be reached", and the sampler treats the two
/// identically. Implementors must be thread-safe (Send + Sync) since the
/// sampling task runs on the tokio runtime.
#[async_trait]
pub trait ReadingSource: Send + Sync {
    /// Performs a single query over `bounds`. No retries.
    async fn fetch(&self, bounds: &BoundingBox) -> Option<f64>;
}
