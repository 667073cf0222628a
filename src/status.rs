//! Periodic status snapshots.
//!
//! The reporter is purely observational: it runs after the alarm and fan
//! have been ticked and only decides *whether* this tick's snapshot goes
//! out. It never feeds back into control state.

use serde::Serialize;

use crate::control::alarm::AlarmMode;
use crate::control::classifier::Tier;
use crate::scheduler::Interval;

/// A point-in-time snapshot of the aggregate monitor state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusReport {
    pub uptime_ms: u64,
    pub tier: Tier,
    pub temperature_c: f32,
    pub humidity_pct: f32,
    /// `false` while running on a substituted reading.
    pub sensor_ok: bool,
    pub alarm_mode: AlarmMode,
    pub alarm_active: bool,
    pub fan_running: bool,
    pub fan_pwm: u8,
}

impl StatusReport {
    /// Fan duty mapped onto 0–100 %.
    pub fn fan_speed_pct(&self) -> u8 {
        (u16::from(self.fan_pwm) * 100 / 255) as u8
    }

    pub fn temperature_f(&self) -> f32 {
        self.temperature_c * 9.0 / 5.0 + 32.0
    }

    pub fn temperature_k(&self) -> f32 {
        self.temperature_c + 273.15
    }
}

/// Lets a snapshot through at most once per `report_interval_ms`.
pub struct StatusReporter {
    interval: Interval,
}

impl StatusReporter {
    pub fn new(report_interval_ms: u32) -> Self {
        Self {
            interval: Interval::new(report_interval_ms),
        }
    }

    /// Returns the snapshot if a report is due this tick.
    pub fn tick(&mut self, now_ms: u64, snapshot: StatusReport) -> Option<StatusReport> {
        self.interval.poll(now_ms).then_some(snapshot)
    }
}
