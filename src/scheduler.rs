//! Cadence timers.
//!
//! Every periodic activity in the monitor (alarm pulses, status snapshots)
//! is driven by an [`Interval`] polled with the tick's single clock reading.
//! Nothing here sleeps or owns a clock; callers pass `now_ms` in.
//!
//! ```text
//!   now_ms ──▶ Interval::poll ──▶ true  (fired, last = now)
//!                              └─▶ false (not yet due)
//! ```
//!
//! A fresh interval is in the **never fired** state and is due on the very
//! first poll, regardless of how close to zero the monotonic clock starts.

/// Fires at most once per `period_ms`, measured from the previous fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period_ms: u64,
    /// `None` until the first fire.
    last_fired_ms: Option<u64>,
}

impl Interval {
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms as u64,
            last_fired_ms: None,
        }
    }

    /// Change the period without touching the last-fired timestamp.
    ///
    /// A shorter period takes effect on the next poll, so escalating from a
    /// slow cadence to a fast one never waits out the old period.
    pub fn set_period(&mut self, period_ms: u32) {
        self.period_ms = period_ms as u64;
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    pub fn last_fired_ms(&self) -> Option<u64> {
        self.last_fired_ms
    }

    /// True if the interval has never fired or a full period has elapsed.
    pub fn is_due(&self, now_ms: u64) -> bool {
        match self.last_fired_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.period_ms,
        }
    }

    /// Fire if due. Returns whether it fired.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if self.is_due(now_ms) {
            self.last_fired_ms = Some(now_ms);
            true
        } else {
            false
        }
    }

    /// Return to the never-fired state.
    pub fn reset(&mut self) {
        self.last_fired_ms = None;
    }
}
