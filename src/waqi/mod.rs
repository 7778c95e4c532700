mod client;
mod fetcher;
mod response;

pub use client::Client;
pub use fetcher::AirQualityFetcher;
pub use response::{BoundsData, BoundsResponse, Station};
