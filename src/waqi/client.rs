use crate::config::WaqiConfig;
use crate::error::FetchError;
use crate::model::BoundingBox;
use crate::waqi::response::BoundsResponse;
use reqwest::Client as HttpClient;

const MAP_BOUNDS_PATH: &str = "/map/bounds/";

/// Thin HTTP wrapper around the WAQI API.
///
/// Every request carries the configured timeout, so a single call can never
/// hang the sampling loop.
pub struct Client {
    http_client: HttpClient,
    config: WaqiConfig,
}

impl Client {
    pub fn new(config: WaqiConfig) -> Result<Self, FetchError> {
        let http_client = HttpClient::builder()
            .timeout(config.timeout())
            .user_agent("reqwest")
            .build()?;
        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn base_url(&self) -> &str {
        self.config.url.trim_end_matches('/')
    }

    /// Queries all stations inside `bounds`.
    pub async fn map_bounds(&self, bounds: &BoundingBox) -> Result<BoundsResponse, FetchError> {
        let url = format!("{}{}", self.base_url(), MAP_BOUNDS_PATH);
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("latlng", bounds.latlng()),
                ("token", self.config.token.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::server_error(status, body));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
