//! Simulated chips for a heater/thermostat loop.
//!
//! Provides:
//! - `HeaterElement`: latches an on/off command and integrates a simple
//!   heating/cooling law, publishing the temperature on a 12-bit analog pin
//! - `TemperatureController`: reads that pin, runs a PID law against a live
//!   setpoint attribute and drives the heater command pin
//! - The pin and attribute traits a host implements to run either chip
//!
//! Each chip is a single-threaded callback-driven state machine. The host owns
//! scheduling: it calls `on_tick` at the chip's period and delivers digital
//! edges to the heater. Nothing here blocks, sleeps or spawns.

pub mod error;
pub mod heater;
pub mod pins;
pub mod thermal;
pub mod thermostat;

pub use error::{ChipError, ChipResult};
pub use heater::{HeaterElement, HeaterSample, HeaterState};
pub use pins::{AnalogInput, AnalogOutput, Attributes, Chip, DigitalOutput, Level};
pub use thermal::ThermalLaw;
pub use thermostat::{ControlSample, TemperatureController};
