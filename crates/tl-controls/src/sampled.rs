//! Sampled execution primitives for periodic components.
//!
//! Each component runs at a fixed sample period. Between samples its outputs
//! are held (zero-order hold) by whatever it last wrote to its pins.
//!
//! Host timers count in integer microseconds, so the clock here does too;
//! adding 0.5 s as a float two hundred times does not land exactly on 100 s.

use crate::error::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};
use tl_core::units::{Time, s, to_micros};

/// Sample configuration for a controller or simulated component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleConfig {
    /// Sample period in seconds.
    pub dt: f64,
}

impl SampleConfig {
    /// Create a new sample configuration.
    ///
    /// # Arguments
    ///
    /// * `dt` - Sample period in seconds (must be positive and finite)
    pub fn new(dt: f64) -> ControlResult<Self> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(ControlError::InvalidArg {
                what: "sample period must be positive",
            });
        }
        Ok(Self { dt })
    }

    /// Sample period as a quantity.
    pub fn period(&self) -> Time {
        s(self.dt)
    }

    /// Sample period in whole microseconds.
    pub fn period_us(&self) -> u64 {
        to_micros(self.period())
    }
}

/// Sample clock tracks when a component should next execute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleClock {
    /// Period in microseconds.
    pub period_us: u64,
    /// Time of next scheduled sample (microseconds).
    pub next_sample_us: u64,
}

impl SampleClock {
    /// Create a clock whose first sample is one period after `start_us`.
    pub fn new(config: SampleConfig, start_us: u64) -> Self {
        let period_us = config.period_us().max(1);
        Self {
            period_us,
            next_sample_us: start_us.saturating_add(period_us),
        }
    }

    /// Returns `true` if `now_us >= next_sample_us`.
    pub fn should_sample(&self, now_us: u64) -> bool {
        now_us >= self.next_sample_us
    }

    /// Advance to the next sample time.
    pub fn advance(&mut self) {
        self.next_sample_us = self.next_sample_us.saturating_add(self.period_us);
    }
}
