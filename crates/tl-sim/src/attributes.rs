//! Per-chip attribute tables.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tl_chips::Attributes;

use crate::error::{SimError, SimResult};

/// Named attribute values for one chip instance.
///
/// Clones share storage, so the host can keep a handle and retune a value
/// while the chip holds another. Only finite values are accepted, which keeps
/// every read a chip makes finite.
#[derive(Clone, Debug, Default)]
pub struct AttributeTable {
    values: Rc<RefCell<BTreeMap<String, f64>>>,
}

impl AttributeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`AttributeTable::set`].
    pub fn with(self, name: &str, value: f64) -> SimResult<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    pub fn set(&self, name: &str, value: f64) -> SimResult<()> {
        if !value.is_finite() {
            return Err(SimError::NonFiniteAttribute {
                name: name.to_string(),
                value,
            });
        }
        self.values.borrow_mut().insert(name.to_string(), value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.borrow().get(name).copied()
    }
}

impl Attributes for AttributeTable {
    fn read(&self, name: &str, default: f64) -> f64 {
        self.get(name).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_read() {
        let table = AttributeTable::new().with("setpoint", 40.0).unwrap();
        assert_eq!(table.read("setpoint", 37.0), 40.0);
        assert_eq!(table.read("power", 50.0), 50.0);
    }

    #[test]
    fn clones_share_values() {
        let table = AttributeTable::new();
        let handle = table.clone();
        table.set("setpoint", 30.0).unwrap();
        assert_eq!(handle.get("setpoint"), Some(30.0));
    }

    #[test]
    fn rejects_non_finite() {
        let table = AttributeTable::new();
        assert!(table.set("setpoint", f64::NAN).is_err());
        assert!(table.set("setpoint", f64::NEG_INFINITY).is_err());
        assert_eq!(table.get("setpoint"), None);
    }
}
