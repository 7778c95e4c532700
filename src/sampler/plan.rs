use std::time::Duration;

/// How long a session runs and how often it ticks.
///
/// `period` is measured in tick units and `rate` is ticks per unit, so a
/// session makes `period * rate` fetches spaced `tick_unit / rate` apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingPlan {
    pub period: u32,
    pub rate: u32,
}

impl SamplingPlan {
    pub fn new(period: u32, rate: u32) -> Self {
        Self { period, rate }
    }

    pub fn total_ticks(&self) -> u64 {
        u64::from(self.period) * u64::from(self.rate)
    }

    /// Pause between ticks. Zero when `rate` is zero, which also means
    /// there are no ticks at all.
    pub fn interval(&self, tick_unit: Duration) -> Duration {
        tick_unit.checked_div(self.rate).unwrap_or(Duration::ZERO)
    }
}

impl Default for SamplingPlan {
    fn default() -> Self {
        Self { period: 5, rate: 1 }
    }
}
