//! Sensor subsystem: the DHT11 driver and the substituting [`SensorSource`].
//!
//! The source turns every raw read (good, failed, or NaN) into a usable
//! [`Reading`]. A failed read is never allowed to disable the alarm or fan:
//! the last valid sample is held instead, for as long as it takes.

pub mod dht11;

use log::warn;
use serde::Serialize;

use crate::app::ports::SensorPort;
use crate::error::SensorError;

/// One raw acquisition from the sensor. Either field may be NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

impl Sample {
    fn check(self) -> Result<Self, SensorError> {
        if self.temperature_c.is_finite() && self.humidity_pct.is_finite() {
            Ok(self)
        } else {
            Err(SensorError::NotANumber)
        }
    }
}

/// The per-tick value the controllers act on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
    /// `false` when the values were substituted from the last valid sample.
    pub valid: bool,
}

impl Reading {
    pub fn fahrenheit(&self) -> f32 {
        self.temperature_c * 9.0 / 5.0 + 32.0
    }

    pub fn kelvin(&self) -> f32 {
        self.temperature_c + 273.15
    }
}

/// Wraps a [`SensorPort`] read with last-valid substitution.
///
/// Before the first valid sample the substitute is 0 °C / 0 %RH, which
/// classifies as Normal with the fan off.
#[derive(Debug, Default)]
pub struct SensorSource {
    last_valid: Option<Sample>,
    failures: u32,
}

impl SensorSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read one sample from `port` and resolve it.
    pub fn read(&mut self, port: &mut impl SensorPort, now_ms: u64) -> Reading {
        self.resolve(port.read(now_ms))
    }

    /// Resolve a raw read result into a [`Reading`].
    pub fn resolve(&mut self, raw: Result<Sample, SensorError>) -> Reading {
        match raw.and_then(Sample::check) {
            Ok(sample) => {
                self.last_valid = Some(sample);
                self.failures = 0;
                Reading {
                    temperature_c: sample.temperature_c,
                    humidity_pct: sample.humidity_pct,
                    valid: true,
                }
            }
            Err(e) => {
                self.failures = self.failures.saturating_add(1);
                let held = self.last_valid.unwrap_or(Sample {
                    temperature_c: 0.0,
                    humidity_pct: 0.0,
                });
                warn!(
                    "Error reading sensor ({}), holding {:.1}\u{00b0}C [{} in a row]",
                    e, held.temperature_c, self.failures
                );
                Reading {
                    temperature_c: held.temperature_c,
                    humidity_pct: held.humidity_pct,
                    valid: false,
                }
            }
        }
    }

    /// Number of consecutive failed reads (0 after any valid sample).
    pub fn consecutive_failures(&self) -> u32 {
        self.failures
    }

    pub fn last_valid(&self) -> Option<Sample> {
        self.last_valid
    }
}
