//! Periodic timer queue for the bench.

use tl_controls::{SampleClock, SampleConfig};

use crate::bench::ChipKind;

/// One armed periodic timer.
#[derive(Clone, Debug)]
struct Timer {
    owner: ChipKind,
    clock: SampleClock,
}

/// Periodic timers fired in time order. Timers due at the same instant fire
/// in registration order.
#[derive(Clone, Debug, Default)]
pub(crate) struct TimerQueue {
    timers: Vec<Timer>,
}

impl TimerQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Arm a repeating timer whose first expiry is one period after `start_us`.
    pub(crate) fn start(&mut self, owner: ChipKind, config: SampleConfig, start_us: u64) {
        self.timers.push(Timer {
            owner,
            clock: SampleClock::new(config, start_us),
        });
    }

    /// Expiry time of the earliest armed timer.
    pub(crate) fn next_due(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.clock.next_sample_us).min()
    }

    /// Fire the earliest timer if it is due at or before `until_us`.
    pub(crate) fn pop_due(&mut self, until_us: u64) -> Option<(u64, ChipKind)> {
        let timer = self
            .timers
            .iter_mut()
            .filter(|t| t.clock.should_sample(until_us))
            .min_by_key(|t| t.clock.next_sample_us)?;
        let due = timer.clock.next_sample_us;
        timer.clock.advance();
        Some((due, timer.owner))
    }
}
