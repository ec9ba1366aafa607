//! Temperature controller chip.
//!
//! Pins: `TEMP_IN` (analog input), `HEATER_OUT` (digital output) and
//! `SETPOINT_IN` (declared, unused). Attribute: `setpoint` in °C, read at init
//! and again on every tick so the host can retune it live.

use serde::{Deserialize, Serialize};
use tl_controls::{PidController, PidOutput, PidState, SampleConfig};
use tl_core::{AnalogScale, Real};
use tracing::{info, warn};

use crate::error::ChipResult;

use crate::pins::{AnalogInput, Attributes, Chip, DigitalOutput, Level, names};

/// Timer period of the controller (seconds).
pub const CONTROLLER_TICK_S: Real = 1.0;

/// Setpoint used when the `setpoint` attribute is absent (°C).
pub const DEFAULT_SETPOINT_C: Real = 37.0;

/// Placeholder reading before the first tick overwrites it.
const INITIAL_READING_C: Real = 36.5;

/// What the controller decided on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlSample {
    pub temperature: Real,
    pub setpoint: Real,
    pub error: Real,
    pub integral: Real,
    pub derivative: Real,
    pub output: Real,
    pub heater_on: bool,
}

/// PID thermostat driving a binary heater command.
#[derive(Debug)]
pub struct TemperatureController<I, O, S> {
    temp_in: I,
    heater_out: O,
    attrs: S,
    pid: PidController,
    pid_state: PidState,
    scale: AnalogScale,
    tick: SampleConfig,
    current_temp: Real,
    setpoint: Real,
    heater_on: bool,
}

impl<I, O, S> TemperatureController<I, O, S>
where
    I: AnalogInput,
    O: DigitalOutput,
    S: Attributes,
{
    pub fn init(attrs: S, temp_in: I, heater_out: O) -> ChipResult<Self> {
        let setpoint = finite_or(
            attrs.read(names::ATTR_SETPOINT, DEFAULT_SETPOINT_C),
            DEFAULT_SETPOINT_C,
        );
        let tick = SampleConfig::new(CONTROLLER_TICK_S)?;
        info!("Temperature Controller initialized. Setpoint: {:.1}°C", setpoint);
        Ok(Self {
            temp_in,
            heater_out,
            attrs,
            pid: PidController::default(),
            pid_state: PidState::default(),
            scale: AnalogScale::default(),
            tick,
            current_temp: INITIAL_READING_C,
            setpoint,
            heater_on: false,
        })
    }

    pub fn current_temp(&self) -> Real {
        self.current_temp
    }

    pub fn setpoint(&self) -> Real {
        self.setpoint
    }

    pub fn pid_state(&self) -> &PidState {
        &self.pid_state
    }

    pub fn heater_on(&self) -> bool {
        self.heater_on
    }

    pub fn heater_out(&self) -> &O {
        &self.heater_out
    }

    pub fn attrs(&self) -> &S {
        &self.attrs
    }

    /// Re-read the setpoint attribute. A non-finite value keeps the last one.
    fn refresh_setpoint(&mut self) {
        let fresh = self.attrs.read(names::ATTR_SETPOINT, DEFAULT_SETPOINT_C);
        if fresh.is_finite() {
            self.setpoint = fresh;
        } else {
            warn!(value = fresh, "ignoring non-finite setpoint attribute");
        }
    }
}

impl<I, O, S> Chip for TemperatureController<I, O, S>
where
    I: AnalogInput,
    O: DigitalOutput,
    S: Attributes,
{
    type Sample = ControlSample;

    const NAME: &'static str = "temperature-controller";

    fn tick_config(&self) -> SampleConfig {
        self.tick
    }

    fn on_tick(&mut self) -> ControlSample {
        self.current_temp = self.scale.decode(self.temp_in.adc_read());
        self.refresh_setpoint();

        let (state, out) = self
            .pid
            .update(&self.pid_state, self.current_temp, self.setpoint, self.tick.dt);
        self.pid_state = state;

        let PidOutput {
            error,
            integral,
            derivative,
            output,
        } = out;
        self.heater_on = self.pid.actuate(output);
        self.heater_out.write(Level::from_bool(self.heater_on));

        info!(
            "Temp: {:.1}°C, Setpoint: {:.1}°C, Error: {:.2}, Heater: {}",
            self.current_temp,
            self.setpoint,
            error,
            if self.heater_on { "ON" } else { "OFF" }
        );

        ControlSample {
            temperature: self.current_temp,
            setpoint: self.setpoint,
            error,
            integral,
            derivative,
            output,
            heater_on: self.heater_on,
        }
    }
}

fn finite_or(value: Real, fallback: Real) -> Real {
    if value.is_finite() { value } else { fallback }
}
