//! Wires between chip pins.
//!
//! A net is a single shared cell. Every handle cloned from a net sees the
//! latest write, which is exactly the hold-last-value behaviour of a pin.
//! The bench is single-threaded, so `Rc<Cell<_>>` is enough.

use std::cell::Cell;
use std::rc::Rc;

use tl_chips::{AnalogInput, AnalogOutput, DigitalOutput, Level};

/// Analog net carrying a raw converter code. Reads 0 until first written.
#[derive(Clone, Debug, Default)]
pub struct AnalogNet {
    code: Rc<Cell<u16>>,
}

impl AnalogNet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u16 {
        self.code.get()
    }
}

impl AnalogOutput for AnalogNet {
    fn dac_write(&mut self, code: u16) {
        self.code.set(code);
    }
}

impl AnalogInput for AnalogNet {
    fn adc_read(&self) -> u16 {
        self.code.get()
    }
}

/// Digital net. Reads low until first driven.
#[derive(Clone, Debug, Default)]
pub struct DigitalNet {
    level: Rc<Cell<Level>>,
    writes: Rc<Cell<u64>>,
}

impl DigitalNet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> Level {
        self.level.get()
    }

    /// Number of writes seen, including ones that did not change the level.
    pub fn writes(&self) -> u64 {
        self.writes.get()
    }
}

impl DigitalOutput for DigitalNet {
    fn write(&mut self, level: Level) {
        self.level.set(level);
        self.writes.set(self.writes.get() + 1);
    }
}
