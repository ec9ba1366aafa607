//! Discrete PID controller with a clamped integral and binary actuation.
//!
//! The law is the plain parallel form:
//!
//! ```text
//! e[n] = sp - pv
//! I[n] = clamp(I[n-1] + e[n] * dt, -limit, limit)
//! D[n] = (e[n] - e[n-1]) / dt
//! u[n] = kp * e[n] + ki * I[n] + kd * D[n]
//! ```
//!
//! The output is not clamped and the integral keeps accumulating while the
//! output is large; the integral clamp is the only anti-windup measure. The
//! derivative acts on the unfiltered error, so a setpoint step produces a
//! one-sample kick.

use crate::error::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};
use tl_core::ensure_finite;

/// PID gains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidGains {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain (per second).
    pub ki: f64,
    /// Derivative gain (seconds).
    pub kd: f64,
}

impl Default for PidGains {
    fn default() -> Self {
        Self {
            kp: 2.0,
            ki: 0.5,
            kd: 1.0,
        }
    }
}

/// PID controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PidController {
    /// Gains.
    pub gains: PidGains,
    /// Integral accumulator is held within `[-integral_limit, integral_limit]`.
    pub integral_limit: f64,
    /// Output strictly above this value turns the actuator on.
    pub on_threshold: f64,
}

impl Default for PidController {
    fn default() -> Self {
        Self {
            gains: PidGains::default(),
            integral_limit: 10.0,
            on_threshold: 0.5,
        }
    }
}

impl PidController {
    /// Create a new PID controller.
    ///
    /// # Arguments
    ///
    /// * `gains` - Proportional, integral and derivative gains
    /// * `integral_limit` - Symmetric bound on the integral accumulator
    /// * `on_threshold` - Output level above which the actuator is switched on
    pub fn new(gains: PidGains, integral_limit: f64, on_threshold: f64) -> ControlResult<Self> {
        ensure_finite(gains.kp, "kp")?;
        ensure_finite(gains.ki, "ki")?;
        ensure_finite(gains.kd, "kd")?;
        ensure_finite(on_threshold, "on_threshold")?;
        if !(integral_limit.is_finite() && integral_limit > 0.0) {
            return Err(ControlError::InvalidArg {
                what: "integral_limit must be positive and finite",
            });
        }
        Ok(Self {
            gains,
            integral_limit,
            on_threshold,
        })
    }

    /// Compute controller output given process variable and setpoint.
    ///
    /// # Arguments
    ///
    /// * `state` - Controller state (integral and previous error)
    /// * `pv` - Process variable (measured value)
    /// * `sp` - Setpoint (desired value)
    /// * `dt` - Time since last update (seconds), must be positive
    ///
    /// # Returns
    ///
    /// Updated state and the terms of this sample.
    pub fn update(&self, state: &PidState, pv: f64, sp: f64, dt: f64) -> (PidState, PidOutput) {
        debug_assert!(dt > 0.0, "PID sample period must be positive");

        // Positive error means PV is below setpoint
        let error = sp - pv;

        let integral = (state.integral + error * dt).clamp(-self.integral_limit, self.integral_limit);
        let derivative = (error - state.last_error) / dt;

        let PidGains { kp, ki, kd } = self.gains;
        let output = kp * error + ki * integral + kd * derivative;

        let new_state = PidState {
            integral,
            last_error: error,
        };

        (
            new_state,
            PidOutput {
                error,
                integral,
                derivative,
                output,
            },
        )
    }

    /// Binary actuation decision for a controller output.
    pub fn actuate(&self, output: f64) -> bool {
        output > self.on_threshold
    }
}

/// PID controller state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PidState {
    /// Integral accumulator.
    pub integral: f64,
    /// Error from the previous sample.
    pub last_error: f64,
}

/// Terms computed by one controller sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidOutput {
    pub error: f64,
    pub integral: f64,
    pub derivative: f64,
    pub output: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pid_controller_defaults() {
        let pid = PidController::default();
        assert_eq!(pid.gains.kp, 2.0);
        assert_eq!(pid.gains.ki, 0.5);
        assert_eq!(pid.gains.kd, 1.0);
        assert_eq!(pid.integral_limit, 10.0);
        assert_eq!(pid.on_threshold, 0.5);
    }

    #[test]
    fn first_sample_near_setpoint() {
        let pid = PidController::default();
        let (state, out) = pid.update(&PidState::default(), 36.5, 37.0, 1.0);

        assert!((out.error - 0.5).abs() < 1e-12);
        assert!((out.integral - 0.5).abs() < 1e-12);
        assert!((out.derivative - 0.5).abs() < 1e-12);
        // 2.0*0.5 + 0.5*0.5 + 1.0*0.5
        assert!((out.output - 1.75).abs() < 1e-12);
        assert!(pid.actuate(out.output));
        assert_eq!(state.last_error, out.error);
    }

    #[test]
    fn integral_clamped_both_ways() {
        let pid = PidController::default();
        let mut state = PidState::default();
        for _ in 0..50 {
            state = pid.update(&state, 20.0, 37.0, 1.0).0;
        }
        assert_eq!(state.integral, 10.0);

        for _ in 0..50 {
            state = pid.update(&state, 50.0, 37.0, 1.0).0;
        }
        assert_eq!(state.integral, -10.0);
    }

    #[test]
    fn derivative_uses_previous_error() {
        let pid = PidController::default();
        let state = PidState {
            integral: 0.0,
            last_error: 2.0,
        };
        let (_, out) = pid.update(&state, 36.0, 37.0, 1.0);
        // error 1.0, previous 2.0
        assert!((out.derivative + 1.0).abs() < 1e-12);
    }

    #[test]
    fn derivative_scales_with_dt() {
        let pid = PidController::default();
        let (_, out) = pid.update(&PidState::default(), 36.0, 37.0, 0.5);
        assert!((out.derivative - 2.0).abs() < 1e-12);
        assert!((out.integral - 0.5).abs() < 1e-12);
    }

    #[test]
    fn threshold_is_strict() {
        let pid = PidController::default();
        assert!(!pid.actuate(0.5));
        assert!(pid.actuate(0.500_001));
        assert!(!pid.actuate(-3.0));
    }

    #[test]
    fn output_not_clamped() {
        let pid = PidController::default();
        let (_, out) = pid.update(&PidState::default(), 20.0, 37.0, 1.0);
        // 2*17 + 0.5*10 + 17
        assert!((out.output - 56.0).abs() < 1e-12);
    }

    #[test]
    fn invalid_controller_params() {
        assert!(PidController::new(PidGains::default(), 0.0, 0.5).is_err());
        assert!(PidController::new(PidGains::default(), f64::INFINITY, 0.5).is_err());
        let bad = PidGains {
            kp: f64::NAN,
            ..PidGains::default()
        };
        assert!(PidController::new(bad, 10.0, 0.5).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn integral_never_leaves_limit(pvs in prop::collection::vec(0.0_f64..80.0_f64, 1..200)) {
            let pid = PidController::default();
            let mut state = PidState::default();
            for pv in pvs {
                state = pid.update(&state, pv, 37.0, 1.0).0;
                prop_assert!(state.integral.abs() <= pid.integral_limit);
            }
        }
    }
}
