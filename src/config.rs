//! System configuration parameters
//!
//! All tunable parameters for the ThermoWatch monitor. The compile-time
//! constants below are the factory defaults; [`MonitorConfig`] carries them
//! at runtime so every controller is built from one validated source.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// --- Classification ---
/// Upper bound (inclusive) of the Normal tier, °C.
pub const NORMAL_MAX_C: f32 = 25.0;
/// Fan activation threshold and lower bound (inclusive) of the High tier, °C.
pub const FAN_ON_C: f32 = 40.0;
/// Width of the fan deactivation band below [`FAN_ON_C`], °C.
pub const HYSTERESIS_C: f32 = 1.0;
/// Temperature at which the fan reaches full speed, °C.
pub const MAX_TEMP_C: f32 = 50.0;

// --- Alarm ---
pub const NORMAL_CADENCE_MS: u32 = 5000;
pub const ELEVATED_CADENCE_MS: u32 = 2000;
pub const HIGH_CADENCE_MS: u32 = 500;
/// How long buzzer and LED stay on per pulse.
pub const PULSE_DURATION_MS: u32 = 200;

// --- Fan ---
/// Lowest duty that reliably clears the motor's stall torque.
pub const FAN_START_PWM: u8 = 100;
pub const FAN_MAX_PWM: u8 = 255;
pub const RAMP_DURATION_MS: u32 = 500;

// --- Timing ---
pub const REPORT_INTERVAL_MS: u32 = 3000;
pub const LOOP_DELAY_MS: u32 = 100;

/// Core monitor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    // --- Thresholds ---
    pub normal_max_c: f32,
    pub fan_on_c: f32,
    pub hysteresis_c: f32,
    pub max_temp_c: f32,

    // --- Alarm ---
    pub normal_cadence_ms: u32,
    pub elevated_cadence_ms: u32,
    pub high_cadence_ms: u32,
    pub pulse_duration_ms: u32,

    // --- Fan ---
    pub fan_start_pwm: u8,
    pub fan_max_pwm: u8,
    pub ramp_duration_ms: u32,

    // --- Timing ---
    /// Status snapshot interval (milliseconds)
    pub report_interval_ms: u32,
    /// Sleep between main loop iterations (milliseconds)
    pub loop_delay_ms: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            normal_max_c: NORMAL_MAX_C,
            fan_on_c: FAN_ON_C,
            hysteresis_c: HYSTERESIS_C,
            max_temp_c: MAX_TEMP_C,

            normal_cadence_ms: NORMAL_CADENCE_MS,
            elevated_cadence_ms: ELEVATED_CADENCE_MS,
            high_cadence_ms: HIGH_CADENCE_MS,
            pulse_duration_ms: PULSE_DURATION_MS,

            fan_start_pwm: FAN_START_PWM,
            fan_max_pwm: FAN_MAX_PWM,
            ramp_duration_ms: RAMP_DURATION_MS,

            report_interval_ms: REPORT_INTERVAL_MS,
            loop_delay_ms: LOOP_DELAY_MS,
        }
    }
}

impl MonitorConfig {
    /// Temperature at or below which a running fan switches off.
    pub fn fan_off_c(&self) -> f32 {
        self.fan_on_c - self.hysteresis_c
    }

    /// Parse a JSON override blob. Missing fields keep their defaults;
    /// the result is validated before it is returned.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(bytes).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }

    /// Range-check every field.
    ///
    /// Rejects rather than clamps: a silently "fixed" threshold could
    /// disable the fan or alarm without anyone noticing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            self.normal_max_c,
            self.fan_on_c,
            self.hysteresis_c,
            self.max_temp_c,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::ValidationFailed("thresholds must be finite"));
        }
        if self.normal_max_c >= self.fan_on_c {
            return Err(ConfigError::ValidationFailed("normal_max_c must be below fan_on_c"));
        }
        if self.fan_on_c >= self.max_temp_c {
            return Err(ConfigError::ValidationFailed("fan_on_c must be below max_temp_c"));
        }
        if self.hysteresis_c <= 0.0 || self.hysteresis_c >= self.fan_on_c - self.normal_max_c {
            return Err(ConfigError::ValidationFailed(
                "hysteresis_c must be positive and narrower than the Elevated band",
            ));
        }
        if self.fan_max_pwm == 0 || self.fan_start_pwm > self.fan_max_pwm {
            return Err(ConfigError::ValidationFailed("fan_start_pwm must not exceed fan_max_pwm"));
        }

        let durations = [
            ("normal_cadence_ms", self.normal_cadence_ms),
            ("elevated_cadence_ms", self.elevated_cadence_ms),
            ("high_cadence_ms", self.high_cadence_ms),
            ("pulse_duration_ms", self.pulse_duration_ms),
            ("ramp_duration_ms", self.ramp_duration_ms),
            ("report_interval_ms", self.report_interval_ms),
            ("loop_delay_ms", self.loop_delay_ms),
        ];
        if let Some(&(name, _)) = durations.iter().find(|(_, v)| *v == 0) {
            return Err(ConfigError::ValidationFailed(name));
        }

        let fastest = self
            .normal_cadence_ms
            .min(self.elevated_cadence_ms)
            .min(self.high_cadence_ms);
        if self.pulse_duration_ms >= fastest {
            return Err(ConfigError::ValidationFailed(
                "pulse_duration_ms must be shorter than every cadence",
            ));
        }
        Ok(())
    }
}
