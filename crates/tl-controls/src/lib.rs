//! Control primitives for thermoloop.
//!
//! Provides the discrete PID law that drives the heater command and the
//! sampled-execution primitives that describe how often each component runs.
//!
//! # Architecture
//!
//! - Controllers are configured once and keep their mutable state in a
//!   separate value, so one configuration can drive many states.
//! - Every update takes an explicit `dt`; there is no wall clock here.
//! - The continuous PID output is turned into an on/off command by a strict
//!   threshold with no hysteresis band.

pub mod controller;
pub mod error;
pub mod sampled;

pub use controller::{PidController, PidGains, PidOutput, PidState};
pub use error::{ControlError, ControlResult};
pub use sampled::{SampleClock, SampleConfig};
