// tl-core/src/units.rs

use uom::si::f64::Time as UomTime;

/// Periods and timer resolutions (SI, f64).
pub type Time = UomTime;

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

/// Convert a period to whole microseconds, the resolution host timers use.
#[inline]
pub fn to_micros(t: Time) -> u64 {
    use uom::si::time::microsecond;
    t.get::<microsecond>().round().max(0.0) as u64
}

pub mod constants {
    /// Room temperature the heater cools toward (°C).
    pub const AMBIENT_DEGC: f64 = 24.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periods_in_micros() {
        assert_eq!(to_micros(s(1.0)), 1_000_000);
        assert_eq!(to_micros(s(0.5)), 500_000);
        assert_eq!(to_micros(s(-1.0)), 0);
    }
}
