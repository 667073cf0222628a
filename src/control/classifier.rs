//! Temperature → severity tier.

use core::fmt;

use serde::Serialize;

use crate::config::MonitorConfig;

/// Discrete severity level, ordered `Normal < Elevated < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Tier {
    Normal,
    Elevated,
    High,
}

impl Tier {
    /// Console label used in status banners.
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Elevated => "ELEVATED",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Maps a temperature to a [`Tier`] using two fixed breakpoints.
///
/// Intervals are closed at the top of the lower tier:
/// `t <= normal_max` is Normal, `normal_max < t < fan_on` is Elevated,
/// `t >= fan_on` is High.
#[derive(Debug, Clone, Copy)]
pub struct ThermalClassifier {
    normal_max_c: f32,
    fan_on_c: f32,
}

impl ThermalClassifier {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            normal_max_c: config.normal_max_c,
            fan_on_c: config.fan_on_c,
        }
    }

    /// Pure; NaN never reaches here (substituted upstream by the sensor source).
    pub fn classify(&self, temperature_c: f32) -> Tier {
        if temperature_c <= self.normal_max_c {
            Tier::Normal
        } else if temperature_c < self.fan_on_c {
            Tier::Elevated
        } else {
            Tier::High
        }
    }
}

impl Default for ThermalClassifier {
    fn default() -> Self {
        Self::new(&MonitorConfig::default())
    }
}
