//! Hysteresis + ramp fan controller.
//!
//! ```text
//!   OFF ──[t >= fan_on]──▶ RAMPING_UP ──[ramp elapsed]──▶ STEADY
//!    ▲                          │                            │
//!    └──────────[t <= fan_on - hysteresis]───────────────────┘
//! ```
//!
//! Between `fan_on - hysteresis` and `fan_on` the fan keeps whatever state
//! it already has (the dead zone), so sensor noise around the threshold
//! cannot toggle it.
//!
//! Output is 0 exactly when the fan is Off. A running fan at or below
//! `fan_on`, including exactly at the threshold and anywhere in the dead
//! zone, is driven at `fan_start_pwm` rather than 0: the state machine, not
//! the temperature, decides whether the motor turns.
//!
//! While running, duty rises linearly from `fan_start_pwm` at `fan_on` to
//! `fan_max_pwm` at `max_temp`. For `ramp_duration` after activation the
//! output is scaled from the floor towards that target so the motor never
//! sees a step from 0 to full speed. The floor itself keeps the motor above
//! its stall torque.

use log::info;

use crate::config::MonitorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanMode {
    Off,
    RampingUp,
    Steady,
}

/// Fan state, owned and mutated only by [`FanController::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanState {
    pub mode: FanMode,
    /// Tick time of the last Off → RampingUp transition.
    pub start_ms: u64,
    /// Duty written on the last tick (0..=255).
    pub pwm: u8,
}

impl FanState {
    pub fn running(&self) -> bool {
        self.mode != FanMode::Off
    }
}

pub struct FanController {
    fan_on_c: f32,
    fan_off_c: f32,
    max_temp_c: f32,
    start_pwm: u8,
    max_pwm: u8,
    ramp_ms: u32,
    state: FanState,
}

impl FanController {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            fan_on_c: config.fan_on_c,
            fan_off_c: config.fan_off_c(),
            max_temp_c: config.max_temp_c,
            start_pwm: config.fan_start_pwm,
            max_pwm: config.fan_max_pwm,
            ramp_ms: config.ramp_duration_ms,
            state: FanState {
                mode: FanMode::Off,
                start_ms: 0,
                pwm: 0,
            },
        }
    }

    /// Advance one tick and return the duty to write to the fan.
    ///
    /// 0 when the fan ends the tick Off, otherwise [`duty`](Self::duty). At
    /// exactly `fan_on_c` a stopped fan starts and outputs `fan_start_pwm`.
    pub fn tick(&mut self, temperature_c: f32, now_ms: u64) -> u8 {
        match self.state.mode {
            FanMode::Off => {
                if temperature_c >= self.fan_on_c {
                    info!("FAN: activated at {:.1}\u{00b0}C", temperature_c);
                    self.state.mode = FanMode::RampingUp;
                    self.state.start_ms = now_ms;
                }
            }
            FanMode::RampingUp | FanMode::Steady => {
                if temperature_c <= self.fan_off_c {
                    info!(
                        "FAN: deactivated at {:.1}\u{00b0}C (<= {:.1}\u{00b0}C)",
                        temperature_c, self.fan_off_c
                    );
                    self.state.mode = FanMode::Off;
                }
            }
        }

        let elapsed_ms = now_ms.saturating_sub(self.state.start_ms);
        if self.state.mode == FanMode::RampingUp && elapsed_ms >= u64::from(self.ramp_ms) {
            self.state.mode = FanMode::Steady;
        }

        self.state.pwm = if self.state.running() {
            self.duty(temperature_c, elapsed_ms)
        } else {
            0
        };
        self.state.pwm
    }

    /// Duty for a running fan at `temperature_c`, `elapsed_ms` after start.
    /// Always within `[start_pwm, max_pwm]`; temperatures at or below
    /// `fan_on_c` map to `start_pwm`, never to 0.
    pub fn duty(&self, temperature_c: f32, elapsed_ms: u64) -> u8 {
        let start = f32::from(self.start_pwm);
        let max = f32::from(self.max_pwm);

        let ratio = ((temperature_c - self.fan_on_c) / (self.max_temp_c - self.fan_on_c)).clamp(0.0, 1.0);
        let target = start + ((max - start) * ratio).trunc();

        let pwm = if elapsed_ms < u64::from(self.ramp_ms) {
            let ramp = elapsed_ms as f32 / self.ramp_ms as f32;
            start + ((target - start) * ramp).trunc()
        } else {
            target
        };
        pwm.clamp(start, max) as u8
    }

    pub fn state(&self) -> &FanState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running()
    }

    pub fn pwm(&self) -> u8 {
        self.state.pwm
    }
}
