//! Configuration utilities for testing.

use crate::config::WaqiConfig;

/// Builder for creating test WAQI configurations.
#[derive(Debug)]
pub struct TestWaqiConfigBuilder {
    url: String,
    token: String,
    timeout_sec: u64,
    pollutant: String,
}

impl TestWaqiConfigBuilder {
    /// Creates a new test config builder with default values.
    pub fn new() -> Self {
        Self {
            url: "http://test.local".to_string(),
            token: "test-token".to_string(),
            timeout_sec: 5,
            pollutant: "pm25".to_string(),
        }
    }

    /// Sets the base URL for the test configuration.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the API token for the test configuration.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Sets the per-request timeout in seconds.
    pub fn with_timeout_sec(mut self, timeout_sec: u64) -> Self {
        self.timeout_sec = timeout_sec;
        self
    }

    /// Sets the pollutant key.
    pub fn with_pollutant(mut self, pollutant: impl Into<String>) -> Self {
        self.pollutant = pollutant.into();
        self
    }

    /// Builds the WAQI configuration.
    pub fn build(self) -> WaqiConfig {
        WaqiConfig {
            url: self.url,
            token: self.token,
            timeout_sec: self.timeout_sec,
            pollutant: self.pollutant,
        }
    }
}

/// Creates a default test WAQI configuration.
pub fn test_waqi_config() -> WaqiConfig {
    TestWaqiConfigBuilder::new().build()
}

/// Creates a test WAQI configuration pointing at a mock server.
pub fn test_waqi_config_with_url(url: impl Into<String>) -> WaqiConfig {
    TestWaqiConfigBuilder::new().with_url(url).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Pollutant;
    use std::time::Duration;

    #[test]
    fn test_waqi_config_builder() {
        let config = TestWaqiConfigBuilder::new()
            .with_url("http://custom.local")
            .with_token("custom-token")
            .with_timeout_sec(2)
            .with_pollutant("o3")
            .build();

        assert_eq!(config.url, "http://custom.local");
        assert_eq!(config.token, "custom-token");
        assert_eq!(config.timeout(), Duration::from_secs(2));
        assert_eq!(config.pollutant().unwrap(), Pollutant::O3);
    }

    #[test]
    fn test_convenience_functions() {
        assert_eq!(test_waqi_config().url, "http://test.local");
        assert_eq!(test_waqi_config_with_url("http://mock.local").url, "http://mock.local");
    }
}
