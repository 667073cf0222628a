//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (sensor, actuators, clock, event sink) implement these
//! traits. The [`MonitorService`](super::service::MonitorService) consumes
//! them via generics, so the domain core never touches hardware directly.

use crate::error::SensorError;
use crate::sensors::Sample;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per tick.
pub trait SensorPort {
    /// Acquire temperature (°C) and relative humidity (%).
    ///
    /// A value the hardware could not produce may come back as NaN inside an
    /// `Ok`; the domain treats that exactly like an `Err`.
    fn read(&mut self, now_ms: u64) -> Result<Sample, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port. Writes are idempotent and assumed to succeed; there is
/// no feedback path from a stuck buzzer or stalled fan.
pub trait ActuatorPort {
    fn set_buzzer(&mut self, on: bool);

    fn set_led(&mut self, on: bool);

    /// Fan duty, 0 (off) to 255 (full speed).
    fn set_fan_pwm(&mut self, duty: u8);

    /// Kill all actuators (buzzer, LED, fan).
    fn all_off(&mut self) {
        self.set_buzzer(false);
        self.set_led(false);
        self.set_fan_pwm(0);
    }
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source. Read once per tick; every timer in the core is
/// relative to that one reading.
pub trait ClockPort {
    /// Milliseconds since boot.
    fn now_ms(&self) -> u64;

    /// Block the caller. Only the main loop's inter-tick sleep and the boot
    /// self-test use this.
    fn delay_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → console / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`MonitorEvent`](super::events::MonitorEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::MonitorEvent);
}
