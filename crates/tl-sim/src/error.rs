//! Error types for host simulation.

use thiserror::Error;

/// Errors encountered while setting up or running the bench.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Attribute {name} rejected non-finite value {value}")]
    NonFiniteAttribute { name: String, value: f64 },

    #[error("Chip error: {message}")]
    Chip { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<tl_chips::ChipError> for SimError {
    fn from(e: tl_chips::ChipError) -> Self {
        SimError::Chip {
            message: e.to_string(),
        }
    }
}

impl From<tl_controls::ControlError> for SimError {
    fn from(e: tl_controls::ControlError) -> Self {
        SimError::Chip {
            message: e.to_string(),
        }
    }
}
