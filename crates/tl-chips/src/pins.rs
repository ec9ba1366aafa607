//! Host-facing pin and attribute interface.
//!
//! The chips never talk to a simulator directly. They are handed pin handles
//! implementing these traits and an attribute source, and the host decides what
//! sits behind them.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tl_controls::SampleConfig;
use tl_core::Real;

/// Digital pin level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    pub fn from_bool(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }

    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        Level::from_bool(high)
    }
}

/// A push-pull digital output.
pub trait DigitalOutput {
    fn write(&mut self, level: Level);
}

/// A DAC-backed analog output taking raw converter codes.
pub trait AnalogOutput {
    fn dac_write(&mut self, code: u16);
}

/// An ADC-backed analog input returning raw converter codes.
pub trait AnalogInput {
    fn adc_read(&self) -> u16;
}

/// Named numeric attributes configured on a chip instance.
///
/// `read` returns `default` when the attribute has not been set.
pub trait Attributes {
    fn read(&self, name: &str, default: Real) -> Real;
}

impl<T: Attributes + ?Sized> Attributes for &T {
    fn read(&self, name: &str, default: Real) -> Real {
        (**self).read(name, default)
    }
}

impl Attributes for HashMap<String, Real> {
    fn read(&self, name: &str, default: Real) -> Real {
        self.get(name).copied().unwrap_or(default)
    }
}

impl Attributes for BTreeMap<String, Real> {
    fn read(&self, name: &str, default: Real) -> Real {
        self.get(name).copied().unwrap_or(default)
    }
}

/// A periodic chip driven by host timer callbacks.
pub trait Chip {
    /// What one tick reports back to the host.
    type Sample;

    /// Name used in host logs.
    const NAME: &'static str;

    /// Fixed timer period.
    fn tick_config(&self) -> SampleConfig;

    /// Timer callback.
    fn on_tick(&mut self) -> Self::Sample;
}

/// Pin and attribute names as declared by the chip definitions.
pub mod names {
    pub const CONTROL: &str = "CONTROL";
    pub const TEMP_FEEDBACK: &str = "TEMP_FEEDBACK";
    pub const TEMP_IN: &str = "TEMP_IN";
    pub const HEATER_OUT: &str = "HEATER_OUT";
    /// Declared by the controller but never read; the setpoint comes from the attribute.
    pub const SETPOINT_IN: &str = "SETPOINT_IN";

    pub const ATTR_POWER: &str = "power";
    pub const ATTR_SETPOINT: &str = "setpoint";
}
