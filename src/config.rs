use crate::error::{ConfigError, Result};
use crate::model::{BoundingBox, Pollutant};
use crate::sampler::SamplingPlan;
use serde_derive::Deserialize;
use std::str::FromStr;
use std::time::Duration;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.as_str()).unwrap_or(tracing::Level::INFO)
    }
}

pub fn load_app_config() -> Result<AppConfig> {
    envy::from_env::<AppConfig>()
        .map_err(|err| ConfigError::env_parse("AppConfig", err).into())
}

fn default_waqi_url() -> String {
    "https://api.waqi.info".to_string()
}

fn default_timeout_sec() -> u64 {
    10
}

fn default_pollutant() -> String {
    "pm25".to_string()
}

#[derive(Deserialize, Debug, Clone)]
pub struct WaqiConfig {
    #[serde(default = "default_waqi_url")]
    pub url: String,
    pub token: String,
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
    #[serde(default = "default_pollutant")]
    pub pollutant: String,
}

impl WaqiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_sec)
    }

    pub fn pollutant(&self) -> Result<Pollutant> {
        Pollutant::from_str(&self.pollutant)
            .map_err(|message| ConfigError::invalid("WAQI_POLLUTANT", message).into())
    }
}

pub fn load_waqi_config() -> Result<WaqiConfig> {
    let config = envy::prefixed("WAQI_")
        .from_env::<WaqiConfig>()
        .map_err(|err| ConfigError::env_parse("WaqiConfig", err))?;
    if config.timeout_sec == 0 {
        return Err(ConfigError::invalid("WAQI_TIMEOUT_SEC", "must be at least 1").into());
    }
    config.pollutant()?;
    Ok(config)
}

fn default_period() -> u32 {
    5
}

fn default_rate() -> u32 {
    1
}

fn default_tick_unit_sec() -> u64 {
    60
}

#[derive(Deserialize, Debug)]
pub struct SamplerConfig {
    // sampling duration, in tick units
    #[serde(default = "default_period")]
    pub period: u32,
    // ticks per tick unit
    #[serde(default = "default_rate")]
    pub rate: u32,
    #[serde(default = "default_tick_unit_sec")]
    pub tick_unit_sec: u64,
}

impl SamplerConfig {
    pub fn plan(&self) -> SamplingPlan {
        SamplingPlan::new(self.period, self.rate)
    }

    pub fn tick_unit(&self) -> Duration {
        Duration::from_secs(self.tick_unit_sec)
    }
}

pub fn load_sampler_config() -> Result<SamplerConfig> {
    let config = envy::prefixed("SAMPLER_")
        .from_env::<SamplerConfig>()
        .map_err(|err| ConfigError::env_parse("SamplerConfig", err))?;
    if config.rate == 0 {
        return Err(ConfigError::invalid("SAMPLER_RATE", "must be at least 1").into());
    }
    if config.tick_unit_sec == 0 {
        return Err(ConfigError::invalid("SAMPLER_TICK_UNIT_SEC", "must be at least 1").into());
    }
    Ok(config)
}

#[derive(Deserialize, Debug)]
pub struct BoundsConfig {
    pub lat1: f64,
    pub lon1: f64,
    pub lat2: f64,
    pub lon2: f64,
}

impl BoundsConfig {
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.lat1, self.lon1, self.lat2, self.lon2)
    }
}

pub fn load_bounds_config() -> Result<BoundsConfig> {
    envy::prefixed("BOUNDS_")
        .from_env::<BoundsConfig>()
        .map_err(|err| ConfigError::env_parse("BoundsConfig", err).into())
}
