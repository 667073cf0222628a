//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these through
//! the [`EventSink`](super::ports::EventSink) port. Adapters on the other
//! side decide what to do with them (serial console, telemetry link, etc.).

use crate::config::MonitorConfig;
use crate::control::classifier::Tier;
use crate::status::StatusReport;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorEvent {
    /// The service has started; carries the configuration it runs with.
    Started(MonitorConfig),

    /// A sensor read failed; the control loop is holding this temperature.
    SensorFault { substituted_c: f32 },

    /// The classified tier changed.
    TierChanged { from: Tier, to: Tier },

    /// The alarm went active (tier above Normal).
    AlarmRaised(Tier),

    /// The alarm returned to plain periodic Normal beeping.
    AlarmCleared,

    FanActivated { temperature_c: f32 },

    FanDeactivated { temperature_c: f32 },

    /// Periodic status snapshot.
    Status(StatusReport),

    /// Progress of the boot-time component self-test.
    SelfTest(SelfTestStage),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfTestStage {
    Alarm,
    Fan,
    Complete,
}
