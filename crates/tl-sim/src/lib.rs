//! Reference host for running the thermoloop chips together.
//!
//! Provides:
//! - Shared pin nets and per-chip attribute tables
//! - A microsecond timer queue driving each chip at its own period
//! - Edge delivery from the controller's command pin to the heater
//! - Scheduled attribute changes (live setpoint retuning)
//! - Trace recording and a fixed-horizon runner

pub mod attributes;
pub mod bench;
pub mod error;
pub mod nets;
pub mod sim;

// Internal modules
mod events;

// Re-exports for public API
pub use attributes::AttributeTable;
pub use bench::{AttributeChange, Bench, BenchSetup, ChipKind, TickOrder};
pub use error::{SimError, SimResult};
pub use nets::{AnalogNet, DigitalNet};
pub use sim::{ControlRow, EdgeRow, HeaterRow, SimOptions, SimRecord, run_sim};
