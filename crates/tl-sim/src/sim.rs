//! Simulation runner and result recording.

use serde::{Deserialize, Serialize};
use tl_chips::{ControlSample, HeaterSample, Level};
use tracing::{info, warn};

use crate::bench::Bench;
use crate::error::{SimError, SimResult};

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Final simulation time (seconds)
    pub t_end: f64,
    /// Maximum number of chip ticks (safety limit)
    pub max_ticks: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            t_end: 120.0,
            max_ticks: 1_000_000,
        }
    }
}

/// One heater tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeaterRow {
    pub t: f64,
    pub sample: HeaterSample,
}

/// One controller tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlRow {
    pub t: f64,
    pub sample: ControlSample,
}

/// One level change delivered to the heater.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRow {
    pub t: f64,
    pub level: Level,
}

/// Record of simulation results.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimRecord {
    pub heater: Vec<HeaterRow>,
    pub controller: Vec<ControlRow>,
    pub edges: Vec<EdgeRow>,
}

impl SimRecord {
    /// Highest heater temperature seen.
    pub fn max_temperature(&self) -> Option<f64> {
        self.heater
            .iter()
            .map(|r| r.sample.temperature)
            .max_by(f64::total_cmp)
    }

    /// Lowest heater temperature seen at or after `from_t`.
    pub fn min_temperature_after(&self, from_t: f64) -> Option<f64> {
        self.heater
            .iter()
            .filter(|r| r.t >= from_t)
            .map(|r| r.sample.temperature)
            .min_by(f64::total_cmp)
    }

    pub fn final_temperature(&self) -> Option<f64> {
        self.heater.last().map(|r| r.sample.temperature)
    }

    /// First time the heater temperature reached `threshold`.
    pub fn first_reaching(&self, threshold: f64) -> Option<f64> {
        self.heater
            .iter()
            .find(|r| r.sample.temperature >= threshold)
            .map(|r| r.t)
    }

    /// Earliest time after which every heater sample stays within `[lo, hi]`.
    pub fn settling_time(&self, lo: f64, hi: f64) -> Option<f64> {
        let inside = |r: &HeaterRow| (lo..=hi).contains(&r.sample.temperature);
        let last_outside = self.heater.iter().rposition(|r| !inside(r));
        match last_outside {
            None => self.heater.first().map(|r| r.t),
            Some(i) => self.heater.get(i + 1).map(|r| r.t),
        }
    }
}

/// Run the bench until `opts.t_end`, recording every tick and edge.
pub fn run_sim(bench: &mut Bench, opts: &SimOptions) -> SimResult<SimRecord> {
    if !(opts.t_end.is_finite() && opts.t_end >= 0.0) {
        return Err(SimError::InvalidArg {
            what: "t_end must be non-negative",
        });
    }
    if opts.max_ticks == 0 {
        return Err(SimError::InvalidArg {
            what: "max_ticks must be positive",
        });
    }

    // `as` saturates, so a huge horizon runs until the tick limit
    let until_us = bench.now_us().saturating_add((opts.t_end * 1e6).round() as u64);
    let mut record = SimRecord::default();

    info!(t_end = opts.t_end, "starting closed-loop run");
    let mut ticks = 0;
    while ticks < opts.max_ticks && bench.step(until_us, &mut record)? {
        ticks += 1;
    }
    if ticks == opts.max_ticks {
        warn!(ticks, t = bench.now_s(), "tick limit reached before t_end");
    } else {
        bench.run_until(until_us, &mut record)?;
    }

    info!(
        ticks,
        edges = record.edges.len(),
        final_temp = ?record.final_temperature(),
        "run finished"
    );
    Ok(record)
}
