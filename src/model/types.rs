use chrono::{DateTime, Local};
use std::fmt;
use std::str::FromStr;

/// Geographic rectangle queried on every tick.
///
/// Coordinates are passed through as given; range checking is left to
/// the remote API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lat1: f64,
    pub lon1: f64,
    pub lat2: f64,
    pub lon2: f64,
}

impl BoundingBox {
    pub fn new(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Self {
        Self {
            lat1,
            lon1,
            lat2,
            lon2,
        }
    }

    /// Renders the box in the `lat1,lon1,lat2,lon2` form used by `latlng`.
    pub fn latlng(&self) -> String {
        format!("{},{},{},{}", self.lat1, self.lon1, self.lat2, self.lon2)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}]", self.latlng())
    }
}

/// Lifecycle state of a sampling session.
///
/// `Idle` is the initial state. `Stopped`, `Done` and `Failed` end a
/// session; starting again from any of them begins a fresh one.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum SamplingStatus {
    #[default]
    Idle,
    Running,
    /// Cancelled by the caller before running to completion
    Stopped,
    /// Ran to completion with at least one reading
    Done,
    /// Ran to completion without a single reading
    Failed,
}

impl SamplingStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stopped | Self::Done | Self::Failed)
    }
}

impl fmt::Display for SamplingStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SamplingStatus::Idle => write!(f, "IDLE"),
            SamplingStatus::Running => write!(f, "RUNNING"),
            SamplingStatus::Stopped => write!(f, "STOPPED"),
            SamplingStatus::Done => write!(f, "DONE"),
            SamplingStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// Point-in-time view of a session, as returned to callers.
///
/// `average` is only ever populated alongside [`SamplingStatus::Done`];
/// the constructors are the only way to build one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatusSnapshot {
    status: SamplingStatus,
    average: Option<f64>,
    ticks_completed: u64,
    readings_collected: usize,
}

impl StatusSnapshot {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn running(ticks_completed: u64, readings_collected: usize) -> Self {
        Self {
            status: SamplingStatus::Running,
            average: None,
            ticks_completed,
            readings_collected,
        }
    }

    pub fn stopped(ticks_completed: u64, readings_collected: usize) -> Self {
        Self {
            status: SamplingStatus::Stopped,
            average: None,
            ticks_completed,
            readings_collected,
        }
    }

    pub fn done(average: f64, ticks_completed: u64, readings_collected: usize) -> Self {
        Self {
            status: SamplingStatus::Done,
            average: Some(average),
            ticks_completed,
            readings_collected,
        }
    }

    pub fn failed(ticks_completed: u64) -> Self {
        Self {
            status: SamplingStatus::Failed,
            average: None,
            ticks_completed,
            readings_collected: 0,
        }
    }

    pub fn status(&self) -> SamplingStatus {
        self.status
    }

    pub fn average(&self) -> Option<f64> {
        self.average
    }

    pub fn ticks_completed(&self) -> u64 {
        self.ticks_completed
    }

    pub fn readings_collected(&self) -> usize {
        self.readings_collected
    }

    /// The `(status, average)` pair callers usually want.
    pub fn as_pair(&self) -> (SamplingStatus, Option<f64>) {
        (self.status, self.average)
    }
}

/// One successful tick.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleReading {
    pub value: f64,
    pub taken_at: DateTime<Local>,
}

impl SampleReading {
    pub fn new(value: f64, taken_at: DateTime<Local>) -> Self {
        Self { value, taken_at }
    }
}

/// Pollutants reported per station by the map-bounds endpoint.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Pollutant {
    Pm25,
    Pm10,
    O3,
    No2,
    So2,
    Co,
}

impl Pollutant {
    /// JSON field name carrying this pollutant on a station entry.
    pub fn key(&self) -> &'static str {
        match self {
            Pollutant::Pm25 => "pm25",
            Pollutant::Pm10 => "pm10",
            Pollutant::O3 => "o3",
            Pollutant::No2 => "no2",
            Pollutant::So2 => "so2",
            Pollutant::Co => "co",
        }
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Pollutant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('.', "").as_str() {
            "pm25" => Ok(Pollutant::Pm25),
            "pm10" => Ok(Pollutant::Pm10),
            "o3" => Ok(Pollutant::O3),
            "no2" => Ok(Pollutant::No2),
            "so2" => Ok(Pollutant::So2),
            "co" => Ok(Pollutant::Co),
            other => Err(format!("unknown pollutant '{}'", other)),
        }
    }
}
