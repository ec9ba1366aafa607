//! Bench configuration schema.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BenchConfig {
    #[serde(default)]
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub heater: HeaterDef,
    #[serde(default)]
    pub controller: ControllerDef,
    #[serde(default)]
    pub run: RunDef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedule: Vec<SetpointChangeDef>,
}

impl BenchConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: crate::LATEST_VERSION,
            name: name.into(),
            heater: HeaterDef::default(),
            controller: ControllerDef::default(),
            run: RunDef::default(),
            schedule: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeaterDef {
    /// Rated power, read by the chip once at init.
    #[serde(default = "default_power_w")]
    pub power_w: f64,
}

impl Default for HeaterDef {
    fn default() -> Self {
        Self {
            power_w: default_power_w(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControllerDef {
    /// Setpoint the controller starts with.
    #[serde(default = "default_setpoint_c")]
    pub setpoint_c: f64,
}

impl Default for ControllerDef {
    fn default() -> Self {
        Self {
            setpoint_c: default_setpoint_c(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunDef {
    #[serde(default = "default_t_end_s")]
    pub t_end_s: f64,
    #[serde(default)]
    pub tick_order: TickOrderDef,
}

impl Default for RunDef {
    fn default() -> Self {
        Self {
            t_end_s: default_t_end_s(),
            tick_order: TickOrderDef::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TickOrderDef {
    #[default]
    HeaterFirst,
    ControllerFirst,
}

/// Live setpoint change applied while the run is in progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetpointChangeDef {
    pub at_s: f64,
    pub setpoint_c: f64,
}

fn default_power_w() -> f64 {
    50.0
}

fn default_setpoint_c() -> f64 {
    37.0
}

fn default_t_end_s() -> f64 {
    120.0
}
