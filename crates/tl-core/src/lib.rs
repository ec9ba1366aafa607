//! tl-core: shared foundation for thermoloop.
//!
//! Contains:
//! - units (uom time type + timer resolution helpers, ambient constant)
//! - numeric (Real + finite checks)
//! - scale (temperature <-> 12-bit analog code mapping)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod scale;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{TlError, TlResult};
pub use numeric::*;
pub use scale::AnalogScale;
pub use units::*;
