//! Air quality sampler
//!
//! Periodically samples a pollutant average over a geographic bounding box
//! from the WAQI map-bounds API and reports the mean over a bounded session.
//!
//! # Architecture
//!
//! - [`waqi::AirQualityFetcher`] performs one HTTP query per call and reduces
//!   it to a single number, absorbing every failure as "no reading".
//! - [`sampler::SamplingController`] owns the session lifecycle: a background
//!   tokio task that ticks at a fixed cadence, honours cooperative
//!   cancellation, and publishes a terminal status exactly once.

pub mod config;
pub mod error;
pub mod model;
pub mod sampler;
pub mod waqi;


pub use model::{BoundingBox, SamplingStatus, StatusSnapshot};
pub use sampler::{SamplingController, SamplingPlan};
