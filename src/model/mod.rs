//! Domain types shared by the fetcher and the sampler.
//!
//! Covers the session status model, the bounding box a session samples over,
//! and the [`ReadingSource`] seam the sampling loop pulls readings from.

pub mod traits;
pub mod types;
pub mod utilities;

// Re-export commonly used items at the module level
pub use traits::ReadingSource;
pub use types::{BoundingBox, Pollutant, SampleReading, SamplingStatus, StatusSnapshot};
pub use utilities::mean;
