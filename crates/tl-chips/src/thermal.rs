//! Lumped heating/cooling law for the heater element.
//!
//! Not a thermal-mass model. While the element is on the temperature rises at
//! a constant rate proportional to its rated power and saturates at a hard
//! ceiling. While it is off the temperature decays exponentially toward
//! ambient, discretised with forward Euler:
//!
//! ```text
//! on:  T += heat_rate * (P / P_ref) * dt,  T = min(T, T_max)
//! off: T -= k_cool * (T - T_amb) * dt
//! ```
//!
//! With `k_cool * dt < 1` the off branch is a contraction toward ambient and
//! can never step past it.

use serde::{Deserialize, Serialize};
use tl_core::constants::AMBIENT_DEGC;

/// Parameters of the heating/cooling law.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalLaw {
    /// Temperature the element relaxes toward when off (°C).
    pub ambient: f64,
    /// Heating rate at reference power (°C/s).
    pub heat_rate: f64,
    /// Power at which `heat_rate` applies (W).
    pub reference_power: f64,
    /// Cooling coefficient (1/s).
    pub cool_coefficient: f64,
    /// Hard ceiling applied after heating (°C).
    pub max_temperature: f64,
}

impl Default for ThermalLaw {
    fn default() -> Self {
        Self {
            ambient: AMBIENT_DEGC,
            heat_rate: 0.5,
            reference_power: 50.0,
            cool_coefficient: 0.1,
            max_temperature: 50.0,
        }
    }
}

impl ThermalLaw {
    /// Heating rate (°C/s) for an element rated at `power_watts`.
    pub fn heat_rate_for(&self, power_watts: f64) -> f64 {
        self.heat_rate * (power_watts / self.reference_power)
    }

    /// Advance `temperature` by `dt` seconds.
    pub fn step(&self, temperature: f64, is_on: bool, power_watts: f64, dt: f64) -> f64 {
        if is_on {
            let heated = temperature + self.heat_rate_for(power_watts) * dt;
            heated.min(self.max_temperature)
        } else {
            temperature - self.cool_coefficient * (temperature - self.ambient) * dt
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heats_at_rated_rate() {
        let law = ThermalLaw::default();
        let t = law.step(24.0, true, 50.0, 0.5);
        assert!((t - 24.25).abs() < 1e-12);
    }

    #[test]
    fn heat_rate_scales_with_power() {
        let law = ThermalLaw::default();
        assert!((law.heat_rate_for(100.0) - 1.0).abs() < 1e-12);
        assert!((law.heat_rate_for(25.0) - 0.25).abs() < 1e-12);
        assert_eq!(law.heat_rate_for(0.0), 0.0);
    }

    #[test]
    fn heating_saturates_at_ceiling() {
        let law = ThermalLaw::default();
        assert_eq!(law.step(49.9, true, 50.0, 0.5), 50.0);
        assert_eq!(law.step(50.0, true, 200.0, 0.5), 50.0);
    }

    #[test]
    fn cools_toward_ambient_independent_of_power() {
        let law = ThermalLaw::default();
        let a = law.step(34.0, false, 50.0, 0.5);
        let b = law.step(34.0, false, 500.0, 0.5);
        // 34 - 0.1 * 10 * 0.5
        assert!((a - 33.5).abs() < 1e-12);
        assert_eq!(a, b);
    }

    #[test]
    fn ambient_is_fixed_point_when_off() {
        let law = ThermalLaw::default();
        assert_eq!(law.step(24.0, false, 50.0, 0.5), 24.0);
    }
}
