//! Frame pacer - best-effort fixed-rate tick deadlines
//!
//! Deadlines are anchored at the event start rather than accumulated tick by
//! tick, so rounding in the tick period never adds up. When a tick overruns
//! its deadline the pacer re-anchors at the current time: the lost time is
//! absorbed as drift and no frame is ever skipped.

use std::time::Duration;

use puppet_core::FRAME_RATE;

/// Fixed-rate tick scheduler
#[derive(Clone, Debug)]
pub struct FramePacer {
    /// Ticks per second
    rate: f64,
    /// Time the current schedule started
    anchor: Duration,
    /// Ticks scheduled since the anchor
    ticks: u64,
    /// Number of ticks that missed their deadline
    overruns: u64,
}

impl FramePacer {
    /// Start a schedule at `start`
    pub fn new(rate: f64, start: Duration) -> Self {
        FramePacer {
            rate,
            anchor: start,
            ticks: 0,
            overruns: 0,
        }
    }

    /// Start a 60 Hz schedule at `start`
    pub fn at_frame_rate(start: Duration) -> Self {
        Self::new(FRAME_RATE, start)
    }

    /// Deadline of the next tick, given the current time
    /// If the deadline has already passed, returns `now` and re-anchors there.
    pub fn next_deadline(&mut self, now: Duration) -> Duration {
        self.ticks += 1;
        let offset = Duration::try_from_secs_f64(self.ticks as f64 / self.rate)
            .unwrap_or(Duration::ZERO);
        let deadline = self.anchor.saturating_add(offset);

        if deadline < now {
            tracing::debug!(
                behind_us = (now - deadline).as_micros() as u64,
                "frame tick overran its deadline"
            );
            self.overruns += 1;
            self.anchor = now;
            self.ticks = 0;
            return now;
        }

        deadline
    }

    /// Tick rate
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Number of overrun ticks so far
    pub fn overruns(&self) -> u64 {
        self.overruns
    }
}
