//! Error types for chip construction.

use thiserror::Error;

/// Errors raised while bringing a chip up. Ticks and edges never fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChipError {
    #[error("Attribute {name} has non-finite value {value}")]
    NonFiniteAttribute { name: &'static str, value: f64 },

    #[error("Heater power must be non-negative, got {value} W")]
    NegativePower { value: f64 },

    #[error("Control configuration error: {0}")]
    Control(#[from] tl_controls::ControlError),
}

pub type ChipResult<T> = Result<T, ChipError>;
