//! Heater element chip.
//!
//! Pins: `CONTROL` (digital input, watched on both edges) and
//! `TEMP_FEEDBACK` (analog output). Attribute: `power` in watts, read once
//! when the chip comes up.

use serde::{Deserialize, Serialize};
use tl_controls::SampleConfig;
use tl_core::constants::AMBIENT_DEGC;
use tl_core::{AnalogScale, Real};
use tracing::info;

use crate::error::{ChipError, ChipResult};
use crate::pins::{AnalogOutput, Attributes, Chip, Level, names};
use crate::thermal::ThermalLaw;

/// Timer period of the heater (seconds).
pub const HEATER_TICK_S: Real = 0.5;

/// Rated power used when the `power` attribute is absent (W).
pub const DEFAULT_POWER_W: Real = 50.0;

/// State owned by one heater instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeaterState {
    /// Simulated temperature (°C).
    pub temperature: Real,
    /// Rated power (W). Fixed at init.
    pub power_watts: Real,
    /// Latched command from the `CONTROL` pin.
    pub is_on: bool,
}

/// What the heater published on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeaterSample {
    pub temperature: Real,
    pub code: u16,
    pub is_on: bool,
}

/// Simulated heater publishing its temperature on an analog pin.
#[derive(Debug)]
pub struct HeaterElement<A> {
    feedback: A,
    state: HeaterState,
    law: ThermalLaw,
    scale: AnalogScale,
    tick: SampleConfig,
}

impl<A: AnalogOutput> HeaterElement<A> {
    /// Bring the heater up at ambient temperature, switched off.
    ///
    /// `power` is read from `attrs` here and never again.
    pub fn init(attrs: &impl Attributes, feedback: A) -> ChipResult<Self> {
        let power_watts = attrs.read(names::ATTR_POWER, DEFAULT_POWER_W);
        if !power_watts.is_finite() {
            return Err(ChipError::NonFiniteAttribute {
                name: names::ATTR_POWER,
                value: power_watts,
            });
        }
        if power_watts < 0.0 {
            return Err(ChipError::NegativePower { value: power_watts });
        }

        let heater = Self {
            feedback,
            state: HeaterState {
                temperature: AMBIENT_DEGC,
                power_watts,
                is_on: false,
            },
            law: ThermalLaw::default(),
            scale: AnalogScale::default(),
            tick: SampleConfig::new(HEATER_TICK_S)?,
        };

        info!("Heater Element initialized. Power: {:.0}W", power_watts);
        Ok(heater)
    }

    /// Edge callback for the `CONTROL` pin.
    ///
    /// Repeated identical levels are harmless: the latch is simply rewritten.
    pub fn on_control_change(&mut self, level: Level) {
        self.state.is_on = level.is_high();
        info!("Heater {}", if self.state.is_on { "ON" } else { "OFF" });
    }

    pub fn state(&self) -> &HeaterState {
        &self.state
    }

    pub fn temperature(&self) -> Real {
        self.state.temperature
    }

    pub fn is_on(&self) -> bool {
        self.state.is_on
    }

    pub fn power_watts(&self) -> Real {
        self.state.power_watts
    }

    pub fn feedback(&self) -> &A {
        &self.feedback
    }
}

impl<A: AnalogOutput> Chip for HeaterElement<A> {
    type Sample = HeaterSample;

    const NAME: &'static str = "heater-element";

    fn tick_config(&self) -> SampleConfig {
        self.tick
    }

    fn on_tick(&mut self) -> HeaterSample {
        let s = &mut self.state;
        s.temperature = self.law.step(s.temperature, s.is_on, s.power_watts, self.tick.dt);

        let code = self.scale.encode(s.temperature);
        self.feedback.dac_write(code);

        info!("Heater temp: {:.1}°C", s.temperature);
        HeaterSample {
            temperature: s.temperature,
            code,
            is_on: s.is_on,
        }
    }
}
