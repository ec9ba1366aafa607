//! Linear mapping between a temperature span and an integer analog code.
//!
//! The heater publishes its temperature through a 12-bit DAC and the
//! controller reads it back through a 12-bit ADC. Both ends share one
//! [`AnalogScale`] so the encoding and decoding stay in agreement.

use crate::error::{TlError, TlResult};
use crate::numeric::{Real, ensure_finite};

/// Full-scale code of a 12-bit converter.
pub const FULL_SCALE_12BIT: u16 = 4095;

/// Temperature span mapped onto `[0, full_scale]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalogScale {
    /// Temperature at code 0 (°C).
    pub lo: Real,
    /// Temperature at full scale (°C).
    pub hi: Real,
    /// Largest code the converter produces.
    pub full_scale: u16,
}

impl Default for AnalogScale {
    fn default() -> Self {
        Self {
            lo: 20.0,
            hi: 50.0,
            full_scale: FULL_SCALE_12BIT,
        }
    }
}

impl AnalogScale {
    pub fn new(lo: Real, hi: Real, full_scale: u16) -> TlResult<Self> {
        ensure_finite(lo, "scale lo")?;
        ensure_finite(hi, "scale hi")?;
        if lo >= hi {
            return Err(TlError::InvalidArg {
                what: "scale lo must be less than hi",
            });
        }
        if full_scale == 0 {
            return Err(TlError::InvalidArg {
                what: "full_scale must be positive",
            });
        }
        Ok(Self { lo, hi, full_scale })
    }

    pub fn span(&self) -> Real {
        self.hi - self.lo
    }

    /// Position of `temperature` in the span, clamped to `[0, 1]`.
    pub fn normalize(&self, temperature: Real) -> Real {
        ((temperature - self.lo) / self.span()).clamp(0.0, 1.0)
    }

    /// Temperature to converter code. Truncates toward zero.
    pub fn encode(&self, temperature: Real) -> u16 {
        (self.normalize(temperature) * Real::from(self.full_scale)) as u16
    }

    /// Converter code to temperature. Codes past full scale read as full scale.
    pub fn decode(&self, code: u16) -> Real {
        let code = code.min(self.full_scale);
        self.lo + (Real::from(code) / Real::from(self.full_scale)) * self.span()
    }
}
