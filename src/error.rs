//! Error types for the air quality sampler.
//!
//! Fetch errors never leave the fetcher: the `ReadingSource` boundary logs
//! them and reports "no reading" for the tick instead.

use thiserror::Error;

/// Result type alias using our custom error types.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type that encompasses all application errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// WAQI communication and decoding errors
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable parsing failed
    #[error("failed to load {section} from environment: {message}")]
    EnvParse { section: String, message: String },

    /// Configuration value is invalid
    #[error("invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// Errors raised while fetching one reading from the air quality API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status
    #[error("server error (status {status}): {message}")]
    ServerError { status: u16, message: String },

    /// API answered but flagged the request as failed
    #[error("API error: {0}")]
    Api(String),

    /// Successful payload without a single usable value
    #[error("no {pollutant} data found for the given bounds")]
    NoReadings { pollutant: String },

    /// Body could not be decoded
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ConfigError {
    /// Creates a new environment parse error.
    pub fn env_parse(section: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::EnvParse {
            section: section.into(),
            message: err.to_string(),
        }
    }

    /// Creates a new invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl FetchError {
    /// Creates a server error from HTTP status and response body.
    pub fn server_error(status: reqwest::StatusCode, body: String) -> Self {
        Self::ServerError {
            status: status.as_u16(),
            message: body,
        }
    }

    /// Creates a no-readings error for the given pollutant key.
    pub fn no_readings(pollutant: impl Into<String>) -> Self {
        Self::NoReadings {
            pollutant: pollutant.into(),
        }
    }

    /// Whether the failure means "the API had nothing for us" rather than
    /// "we could not talk to the API".
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoReadings { .. })
    }
}
