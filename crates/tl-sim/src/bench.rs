//! The bench: both chips, their nets, and the scheduler that drives them.
//!
//! Wiring:
//!
//! ```text
//! controller HEATER_OUT --(command)--> heater CONTROL
//! heater TEMP_FEEDBACK  --(feedback)--> controller TEMP_IN
//! ```
//!
//! The heater's `CONTROL` pin is watched on both edges: the bench delivers
//! `on_control_change` only when the level driving it differs from the last
//! level delivered. A manual override, when set, drives the pin in place of
//! the controller's command.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tl_chips::pins::names;
use tl_chips::{Chip, HeaterElement, Level, TemperatureController};
use tracing::{debug, info, warn};

use crate::attributes::AttributeTable;
use crate::error::{SimError, SimResult};
use crate::events::TimerQueue;
use crate::nets::{AnalogNet, DigitalNet};
use crate::sim::{ControlRow, EdgeRow, HeaterRow, SimRecord};

/// Which chip a timer or attribute belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChipKind {
    Heater,
    Controller,
}

/// Order in which timers due at the same instant fire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOrder {
    #[default]
    HeaterFirst,
    ControllerFirst,
}

/// An attribute write applied at a fixed simulated time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttributeChange {
    /// Simulated time (seconds).
    pub at_s: f64,
    pub chip: ChipKind,
    pub name: String,
    pub value: f64,
}

impl AttributeChange {
    pub fn setpoint(at_s: f64, value: f64) -> Self {
        Self {
            at_s,
            chip: ChipKind::Controller,
            name: names::ATTR_SETPOINT.to_string(),
            value,
        }
    }

    fn at_us(&self) -> u64 {
        (self.at_s * 1e6).round() as u64
    }
}

/// Attribute values the chips come up with, plus scheduled changes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BenchSetup {
    /// Heater `power` attribute (W). Chip default when `None`.
    pub power_w: Option<f64>,
    /// Controller `setpoint` attribute (°C). Chip default when `None`.
    pub setpoint_c: Option<f64>,
    pub changes: Vec<AttributeChange>,
    pub tick_order: TickOrder,
}

type Heater = HeaterElement<AnalogNet>;
type Controller = TemperatureController<AnalogNet, DigitalNet, AttributeTable>;

/// Heater and controller wired into a closed loop.
pub struct Bench {
    heater: Heater,
    controller: Controller,
    heater_attrs: AttributeTable,
    controller_attrs: AttributeTable,
    feedback: AnalogNet,
    command: DigitalNet,
    delivered: Level,
    manual: Option<Level>,
    timers: TimerQueue,
    changes: VecDeque<AttributeChange>,
    /// Attribute values and tick order `reset` restores. Holds no changes.
    initial: BenchSetup,
    now_us: u64,
}

impl Bench {
    pub fn new(setup: BenchSetup) -> SimResult<Self> {
        let BenchSetup {
            power_w,
            setpoint_c,
            changes,
            tick_order,
        } = setup;

        let mut changes = changes;
        for change in &changes {
            if !(change.at_s.is_finite() && change.at_s >= 0.0) {
                return Err(SimError::InvalidArg {
                    what: "attribute change time must be non-negative",
                });
            }
            if !change.value.is_finite() {
                return Err(SimError::NonFiniteAttribute {
                    name: change.name.clone(),
                    value: change.value,
                });
            }
        }
        changes.sort_by(|a, b| a.at_s.total_cmp(&b.at_s));

        let initial = BenchSetup {
            power_w,
            setpoint_c,
            changes: Vec::new(),
            tick_order,
        };
        let mut bench = Self::assemble(initial, 0)?;
        bench.changes = changes.into();
        Ok(bench)
    }

    /// Bring both chips up from `initial` with their timers armed at `start_us`.
    fn assemble(initial: BenchSetup, start_us: u64) -> SimResult<Self> {
        let heater_attrs = AttributeTable::new();
        if let Some(p) = initial.power_w {
            heater_attrs.set(names::ATTR_POWER, p)?;
        }
        let controller_attrs = AttributeTable::new();
        if let Some(sp) = initial.setpoint_c {
            controller_attrs.set(names::ATTR_SETPOINT, sp)?;
        }

        let feedback = AnalogNet::new();
        let command = DigitalNet::new();

        let heater = HeaterElement::init(&heater_attrs, feedback.clone())?;
        let controller =
            TemperatureController::init(controller_attrs.clone(), feedback.clone(), command.clone())?;

        let mut timers = TimerQueue::new();
        match initial.tick_order {
            TickOrder::HeaterFirst => {
                timers.start(ChipKind::Heater, heater.tick_config(), start_us);
                timers.start(ChipKind::Controller, controller.tick_config(), start_us);
            }
            TickOrder::ControllerFirst => {
                timers.start(ChipKind::Controller, controller.tick_config(), start_us);
                timers.start(ChipKind::Heater, heater.tick_config(), start_us);
            }
        }

        Ok(Self {
            heater,
            controller,
            heater_attrs,
            controller_attrs,
            feedback,
            command,
            delivered: Level::Low,
            manual: None,
            timers,
            changes: VecDeque::new(),
            initial,
            now_us: start_us,
        })
    }

    /// Power-cycle both chips at the current time.
    ///
    /// Temperature, PID state, nets and attributes return to their initial
    /// values and any manual override is cleared. Time does not rewind;
    /// scheduled changes not yet applied stay pending.
    pub fn reset(&mut self) -> SimResult<()> {
        let mut fresh = Self::assemble(self.initial.clone(), self.now_us)?;
        fresh.changes = std::mem::take(&mut self.changes);
        *self = fresh;
        info!(t = self.now_s(), "bench reset");
        Ok(())
    }

    /// Current simulated time (seconds).
    pub fn now_s(&self) -> f64 {
        self.now_us as f64 / 1e6
    }

    pub fn now_us(&self) -> u64 {
        self.now_us
    }

    pub fn heater(&self) -> &Heater {
        &self.heater
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn feedback(&self) -> &AnalogNet {
        &self.feedback
    }

    pub fn command(&self) -> &DigitalNet {
        &self.command
    }

    /// Write an attribute immediately.
    ///
    /// The heater reads `power` only at init, so later writes are stored but
    /// have no effect on it.
    pub fn set_attribute(&self, chip: ChipKind, name: &str, value: f64) -> SimResult<()> {
        match chip {
            ChipKind::Heater => {
                if name == names::ATTR_POWER {
                    warn!(value, "heater power is read once at init; change ignored by the chip");
                }
                self.heater_attrs.set(name, value)
            }
            ChipKind::Controller => self.controller_attrs.set(name, value),
        }
    }

    /// Force the heater's `CONTROL` pin to `level`, or hand it back to the
    /// controller with `None`. Takes effect immediately.
    ///
    /// The controller keeps ticking and writing its command net while
    /// overridden; its writes reach the heater again once the override is
    /// released.
    pub fn set_heater_override(&mut self, level: Option<Level>, record: &mut SimRecord) {
        if self.manual != level {
            info!(t = self.now_s(), ?level, "heater override");
        }
        self.manual = level;
        self.deliver_edge(self.now_s(), record);
    }

    pub fn heater_override(&self) -> Option<Level> {
        self.manual
    }

    /// Process the next timer expiring at or before `until_us`.
    ///
    /// Returns `false` once nothing further is due in that window.
    pub fn step(&mut self, until_us: u64, record: &mut SimRecord) -> SimResult<bool> {
        let Some(due) = self.timers.next_due().filter(|&due| due <= until_us) else {
            return Ok(false);
        };
        self.apply_changes(due)?;

        let Some((due, owner)) = self.timers.pop_due(until_us) else {
            return Ok(false);
        };
        self.now_us = due;
        let t = self.now_s();

        match owner {
            ChipKind::Heater => {
                debug!(chip = Heater::NAME, t, "tick");
                let sample = self.heater.on_tick();
                record.heater.push(HeaterRow { t, sample });
            }
            ChipKind::Controller => {
                debug!(chip = Controller::NAME, t, "tick");
                let sample = self.controller.on_tick();
                record.controller.push(ControlRow { t, sample });
                self.deliver_edge(t, record);
            }
        }
        Ok(true)
    }

    /// Advance until simulated time reaches `until_us`.
    pub fn run_until(&mut self, until_us: u64, record: &mut SimRecord) -> SimResult<usize> {
        let mut ticks = 0;
        while self.step(until_us, record)? {
            ticks += 1;
        }
        self.apply_changes(until_us)?;
        self.now_us = self.now_us.max(until_us);
        Ok(ticks)
    }

    fn apply_changes(&mut self, now_us: u64) -> SimResult<()> {
        while self.changes.front().is_some_and(|c| c.at_us() <= now_us) {
            if let Some(change) = self.changes.pop_front() {
                debug!(t = change.at_s, chip = ?change.chip, name = %change.name, value = change.value, "attribute change");
                self.set_attribute(change.chip, &change.name, change.value)?;
            }
        }
        Ok(())
    }

    fn deliver_edge(&mut self, t: f64, record: &mut SimRecord) {
        let level = self.manual.unwrap_or_else(|| self.command.level());
        if level != self.delivered {
            self.delivered = level;
            self.heater.on_control_change(level);
            record.edges.push(EdgeRow { t, level });
        }
    }
}
