//! Wire types for the `/map/bounds/` endpoint.
//!
//! A successful body looks like
//! `{"status": "ok", "data": [{"pm25": {"v": 12.0}, ...}, ...]}`; an error body
//! carries a message instead of a station list:
//! `{"status": "error", "data": "Invalid key"}`.

use serde_derive::Deserialize;
use serde_json::{Map, Value};

use crate::error::FetchError;
use crate::model::Pollutant;

const STATUS_OK: &str = "ok";

#[derive(Deserialize, Debug)]
pub struct BoundsResponse {
    pub status: String,
    #[serde(default)]
    pub data: BoundsData,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum BoundsData {
    Stations(Vec<Station>),
    Message(String),
    Other(Value),
}

impl Default for BoundsData {
    fn default() -> Self {
        BoundsData::Other(Value::Null)
    }
}

/// One monitoring station inside the box. Only the pollutant fields matter
/// here, so everything is kept as raw JSON.
#[derive(Deserialize, Debug)]
pub struct Station {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Station {
    /// The station's `{"v": <number>}` value for `pollutant`, if it reports one.
    pub fn value(&self, pollutant: Pollutant) -> Option<f64> {
        self.fields.get(pollutant.key())?.get("v")?.as_f64()
    }
}

impl BoundsResponse {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Every usable `pollutant` value across the returned stations.
    ///
    /// Fails with [`FetchError::Api`] when the API flagged the request as
    /// failed. An `ok` response without stations yields an empty list.
    pub fn pollutant_values(&self, pollutant: Pollutant) -> Result<Vec<f64>, FetchError> {
        if !self.is_ok() {
            let message = match &self.data {
                BoundsData::Message(message) => message.clone(),
                BoundsData::Other(Value::Null) => "Unknown error".to_string(),
                BoundsData::Other(value) => value.to_string(),
                BoundsData::Stations(_) => format!("status '{}'", self.status),
            };
            return Err(FetchError::Api(message));
        }

        match &self.data {
            BoundsData::Stations(stations) => Ok(stations
                .iter()
                .filter_map(|station| station.value(pollutant))
                .collect()),
            _ => Ok(Vec::new()),
        }
    }
}
