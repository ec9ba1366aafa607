//! Behavioural tests for the heater and controller chips in isolation.
//!
//! Pins are plain recording/stub types; no scheduler is involved.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use proptest::prelude::*;
use tl_chips::pins::names;
use tl_chips::{
    AnalogInput, AnalogOutput, Attributes, Chip, DigitalOutput, HeaterElement, Level,
    TemperatureController,
};
use tl_core::AnalogScale;

#[derive(Debug, Default)]
struct LastCode(Option<u16>);

impl AnalogOutput for LastCode {
    fn dac_write(&mut self, code: u16) {
        self.0 = Some(code);
    }
}

struct FixedAdc(u16);

impl AnalogInput for FixedAdc {
    fn adc_read(&self) -> u16 {
        self.0
    }
}

#[derive(Default)]
struct LastLevel(Option<Level>);

impl DigitalOutput for LastLevel {
    fn write(&mut self, level: Level) {
        self.0 = Some(level);
    }
}

/// Setpoint knob the test can turn while the controller holds a handle.
#[derive(Clone)]
struct Knob(Rc<Cell<f64>>);

impl Attributes for Knob {
    fn read(&self, name: &str, default: f64) -> f64 {
        if name == names::ATTR_SETPOINT {
            self.0.get()
        } else {
            default
        }
    }
}

fn stock_heater() -> HeaterElement<LastCode> {
    HeaterElement::init(&HashMap::<String, f64>::new(), LastCode::default()).unwrap()
}

#[test]
fn heater_converges_to_ceiling_and_stays() {
    let mut heater = stock_heater();
    heater.on_control_change(Level::High);

    // 26 degrees at 0.25 per tick
    for _ in 0..104 {
        heater.on_tick();
    }
    assert_eq!(heater.temperature(), 50.0);
    assert_eq!(heater.feedback().0, Some(4095));

    for _ in 0..50 {
        let sample = heater.on_tick();
        assert_eq!(sample.temperature, 50.0);
    }
}

#[test]
fn heater_cools_monotonically_to_ambient() {
    let mut heater = stock_heater();
    heater.on_control_change(Level::High);
    for _ in 0..200 {
        heater.on_tick();
    }
    heater.on_control_change(Level::Low);

    let mut prev = heater.temperature();
    for _ in 0..2000 {
        let t = heater.on_tick().temperature;
        assert!(t <= prev);
        assert!(t >= 24.0);
        prev = t;
    }
    assert!((prev - 24.0).abs() < 1e-6);
}

#[test]
fn heater_output_mapping_points() {
    let scale = AnalogScale::default();
    assert_eq!(scale.encode(20.0), 0);
    assert_eq!(scale.encode(50.0), 4095);
    let mid = i32::from(scale.encode(35.0));
    assert!((mid - 2047).abs() <= 1);
}

#[test]
fn identical_edges_do_not_disturb_temperature() {
    let mut heater = stock_heater();
    heater.on_control_change(Level::High);
    heater.on_tick();
    let before = *heater.state();

    heater.on_control_change(Level::High);
    assert_eq!(*heater.state(), before);

    let a = heater.on_tick().temperature;
    let mut twin = stock_heater();
    twin.on_control_change(Level::High);
    twin.on_tick();
    let b = twin.on_tick().temperature;
    assert_eq!(a, b);
}

#[test]
fn controller_first_tick_near_setpoint_turns_heater_on() {
    let scale = AnalogScale::default();
    let code = scale.encode(36.5);
    let mut controller = TemperatureController::init(
        HashMap::<String, f64>::new(),
        FixedAdc(code),
        LastLevel::default(),
    )
    .unwrap();

    let sample = controller.on_tick();
    assert!((sample.temperature - 36.5).abs() < 0.01);
    assert!((sample.error - 0.5).abs() < 0.01);
    assert!((sample.output - 1.75).abs() < 0.05);
    assert!(sample.heater_on);
    assert_eq!(controller.heater_out().0, Some(Level::High));
}

#[test]
fn controller_integral_bounded_under_sustained_error() {
    let mut controller = TemperatureController::init(
        HashMap::<String, f64>::new(),
        FixedAdc(0),
        LastLevel::default(),
    )
    .unwrap();
    for _ in 0..150 {
        let sample = controller.on_tick();
        assert!(sample.integral <= 10.0);
        assert!(sample.heater_on);
    }
    assert_eq!(controller.pid_state().integral, 10.0);
}

#[test]
fn controller_follows_live_setpoint() {
    let knob = Knob(Rc::new(Cell::new(37.0)));
    let scale = AnalogScale::default();
    let mut controller =
        TemperatureController::init(knob.clone(), FixedAdc(scale.encode(37.0)), LastLevel::default())
            .unwrap();

    controller.on_tick();
    knob.0.set(25.0);
    let sample = controller.on_tick();
    assert_eq!(sample.setpoint, 25.0);
    assert!(!sample.heater_on);
    assert_eq!(controller.heater_out().0, Some(Level::Low));

    knob.0.set(45.0);
    let sample = controller.on_tick();
    assert_eq!(sample.setpoint, 45.0);
    assert!(sample.heater_on);
}

proptest! {
    #[test]
    fn heater_temperature_stays_in_band(commands in prop::collection::vec((any::<bool>(), 1_usize..40), 1..30)) {
        let mut heater = stock_heater();
        for (on, ticks) in commands {
            heater.on_control_change(Level::from_bool(on));
            for _ in 0..ticks {
                let t = heater.on_tick().temperature;
                prop_assert!(t >= 20.0 - 1e-9);
                prop_assert!(t <= 50.0 + 1e-9);
            }
        }
    }

    #[test]
    fn heater_cooling_never_undershoots(warmup in 0_usize..150, idle in 1_usize..400) {
        let mut heater = stock_heater();
        heater.on_control_change(Level::High);
        for _ in 0..warmup {
            heater.on_tick();
        }
        heater.on_control_change(Level::Low);
        let mut prev = heater.temperature();
        for _ in 0..idle {
            let t = heater.on_tick().temperature;
            prop_assert!(t <= prev);
            prop_assert!(t >= 24.0);
            prev = t;
        }
    }

    #[test]
    fn controller_integral_bounded_for_any_reading(codes in prop::collection::vec(0_u16..=4095, 1..200)) {
        let reading = Rc::new(Cell::new(0_u16));
        struct SharedAdc(Rc<Cell<u16>>);
        impl AnalogInput for SharedAdc {
            fn adc_read(&self) -> u16 {
                self.0.get()
            }
        }
        let mut controller = TemperatureController::init(
            HashMap::<String, f64>::new(),
            SharedAdc(reading.clone()),
            LastLevel::default(),
        )
        .unwrap();
        for code in codes {
            reading.set(code);
            let sample = controller.on_tick();
            prop_assert!(sample.integral.abs() <= 10.0);
        }
    }
}
