//! Tiered buzzer + LED alarm.
//!
//! ```text
//!   Idle ──[first tick]──▶ PeriodicBeep  (Normal: 5 s, Elevated: 2 s)
//!                     └──▶ ContinuousBeep (High: 0.5 s)
//! ```
//!
//! The mode is re-selected from the tier on every tick; both beep modes run
//! the same pulse logic and differ only in cadence. A pulse turns buzzer and
//! LED on and records a deadline; a later tick switches them off once the
//! deadline has passed. No tick ever blocks for the pulse width.

use log::{debug, info};
use serde::Serialize;

use super::classifier::Tier;
use crate::config::MonitorConfig;
use crate::scheduler::Interval;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlarmMode {
    Idle,
    PeriodicBeep,
    ContinuousBeep,
}

impl AlarmMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::PeriodicBeep => "PERIODIC",
            Self::ContinuousBeep => "CONTINUOUS",
        }
    }
}

/// Alarm state, owned and mutated only by [`AlarmController::tick`].
#[derive(Debug, Clone, Copy)]
pub struct AlarmState {
    /// Reporting only; never gates pulsing.
    pub active: bool,
    pub mode: AlarmMode,
    /// Cadence timer; its last-fired time is the last pulse start.
    pub cadence: Interval,
    /// Deadline at which the current pulse ends. `None` = outputs off.
    pub pulse_until_ms: Option<u64>,
}

/// What the alarm outputs should be after this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmOutput {
    /// Drive buzzer and LED high.
    pub on: bool,
    /// A new pulse began this tick.
    pub pulse_started: bool,
}

pub struct AlarmController {
    normal_cadence_ms: u32,
    elevated_cadence_ms: u32,
    high_cadence_ms: u32,
    pulse_duration_ms: u32,
    state: AlarmState,
}

impl AlarmController {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            normal_cadence_ms: config.normal_cadence_ms,
            elevated_cadence_ms: config.elevated_cadence_ms,
            high_cadence_ms: config.high_cadence_ms,
            pulse_duration_ms: config.pulse_duration_ms,
            state: AlarmState {
                active: false,
                mode: AlarmMode::Idle,
                cadence: Interval::new(config.normal_cadence_ms),
                pulse_until_ms: None,
            },
        }
    }

    pub fn cadence_for(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Normal => self.normal_cadence_ms,
            Tier::Elevated => self.elevated_cadence_ms,
            Tier::High => self.high_cadence_ms,
        }
    }

    /// Advance one tick.
    pub fn tick(&mut self, tier: Tier, now_ms: u64) -> AlarmOutput {
        let cadence = self.cadence_for(tier);
        let s = &mut self.state;
        s.mode = match tier {
            Tier::High => AlarmMode::ContinuousBeep,
            Tier::Normal | Tier::Elevated => AlarmMode::PeriodicBeep,
        };
        s.cadence.set_period(cadence);

        if tier != Tier::Normal && !s.active {
            info!("ALARM: temperature {}, beeping every {}ms", tier, cadence);
            s.active = true;
        }

        // Close a pulse whose deadline has passed.
        if s.pulse_until_ms.is_some_and(|end| now_ms >= end) {
            s.pulse_until_ms = None;
            if tier == Tier::Normal && s.active {
                info!("ALARM: back to normal");
                s.active = false;
            }
        }

        let mut pulse_started = false;
        if s.pulse_until_ms.is_none() && s.cadence.poll(now_ms) {
            s.pulse_until_ms = Some(now_ms + u64::from(self.pulse_duration_ms));
            pulse_started = true;
            debug!("alarm pulse at {}ms ({} cadence {}ms)", now_ms, tier, cadence);
        }

        AlarmOutput {
            on: s.pulse_until_ms.is_some(),
            pulse_started,
        }
    }

    pub fn state(&self) -> &AlarmState {
        &self.state
    }

    pub fn mode(&self) -> AlarmMode {
        self.state.mode
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Start time of the most recent pulse.
    pub fn last_pulse_ms(&self) -> Option<u64> {
        self.state.cadence.last_fired_ms()
    }
}
