//! Bench configuration validation.

use crate::schema::BenchConfig;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn finite(field: &str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid(field, value, "must be finite"))
    }
}

pub fn validate_config(config: &BenchConfig) -> Result<(), ValidationError> {
    if config.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    let power = finite("heater.power_w", config.heater.power_w)?;
    if power < 0.0 {
        return Err(invalid("heater.power_w", power, "must be non-negative"));
    }

    finite("controller.setpoint_c", config.controller.setpoint_c)?;

    let t_end = finite("run.t_end_s", config.run.t_end_s)?;
    if t_end <= 0.0 {
        return Err(invalid("run.t_end_s", t_end, "must be positive"));
    }

    let mut last_at = 0.0;
    for (i, change) in config.schedule.iter().enumerate() {
        let field = format!("schedule[{i}].at_s");
        let at = finite(&field, change.at_s)?;
        if at < 0.0 || at > t_end {
            return Err(invalid(field, at, "must lie within the run"));
        }
        if at < last_at {
            return Err(invalid(field, at, "schedule must be in time order"));
        }
        last_at = at;
        finite(&format!("schedule[{i}].setpoint_c"), change.setpoint_c)?;
    }

    Ok(())
}
