//! Turn a bench configuration into a runnable bench setup.

use tl_project::{BenchConfig, TickOrderDef};
use tl_sim::{AttributeChange, BenchSetup, SimOptions, TickOrder};

/// Command-line overrides applied on top of a loaded config.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub setpoint_c: Option<f64>,
    pub power_w: Option<f64>,
    pub t_end_s: Option<f64>,
    pub controller_first: bool,
}

impl Overrides {
    pub fn apply(&self, mut config: BenchConfig) -> BenchConfig {
        if let Some(sp) = self.setpoint_c {
            config.controller.setpoint_c = sp;
        }
        if let Some(p) = self.power_w {
            config.heater.power_w = p;
        }
        if let Some(t) = self.t_end_s {
            config.run.t_end_s = t;
        }
        if self.controller_first {
            config.run.tick_order = TickOrderDef::ControllerFirst;
        }
        config
    }
}

pub fn bench_setup(config: &BenchConfig) -> BenchSetup {
    BenchSetup {
        power_w: Some(config.heater.power_w),
        setpoint_c: Some(config.controller.setpoint_c),
        changes: config
            .schedule
            .iter()
            .map(|c| AttributeChange::setpoint(c.at_s, c.setpoint_c))
            .collect(),
        tick_order: match config.run.tick_order {
            TickOrderDef::HeaterFirst => TickOrder::HeaterFirst,
            TickOrderDef::ControllerFirst => TickOrder::ControllerFirst,
        },
    }
}

pub fn sim_options(config: &BenchConfig) -> SimOptions {
    SimOptions {
        t_end: config.run.t_end_s,
        ..SimOptions::default()
    }
}
