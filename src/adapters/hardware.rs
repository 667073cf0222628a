//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the temperature sensor and all actuator drivers, exposing them
//! through [`SensorPort`] and [`ActuatorPort`]. Everything is generic over
//! embedded-hal, so the same adapter wraps `PinDriver`/`LedcDriver` on the
//! board and mock pins on the host.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::alarm_outputs::SignalOutput;
use crate::drivers::fan_pwm::FanPwm;
use crate::error::{self, SensorError};
use crate::sensors::Sample;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<S, B, L, F> {
    sensor: S,
    buzzer: SignalOutput<B>,
    led: SignalOutput<L>,
    fan: FanPwm<F>,
}

impl<S, B, L, F> HardwareAdapter<S, B, L, F>
where
    S: SensorPort,
    B: OutputPin,
    L: OutputPin,
    F: SetDutyCycle,
{
    pub fn new(sensor: S, buzzer: B, led: L, fan: F) -> Self {
        Self {
            sensor,
            buzzer: SignalOutput::buzzer(buzzer),
            led: SignalOutput::led(led),
            fan: FanPwm::new(fan),
        }
    }

    /// Power-on check: drive every output to its idle level and take one
    /// sensor reading, stopping at the first failure.
    ///
    /// Unlike the [`ActuatorPort`] methods, which shrug off a failed write
    /// and retry next tick, this surfaces the fault so the caller can report
    /// a miswired board before the loop starts.
    pub fn check(&mut self, now_ms: u64) -> error::Result<Sample> {
        self.buzzer.set(false)?;
        self.led.set(false)?;
        self.fan.stop()?;
        Ok(self.sensor.read(now_ms)?)
    }

    pub fn buzzer_on(&self) -> bool {
        self.buzzer.is_on()
    }

    pub fn led_on(&self) -> bool {
        self.led.is_on()
    }

    pub fn fan_duty(&self) -> u8 {
        self.fan.current_duty()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<S, B, L, F> SensorPort for HardwareAdapter<S, B, L, F>
where
    S: SensorPort,
{
    fn read(&mut self, now_ms: u64) -> Result<Sample, SensorError> {
        self.sensor.read(now_ms)
    }
}

// ── ActuatorPort implementation ───────────────────────────────
//
// Write failures were already logged by the driver; the control loop
// retries on the next tick anyway.

impl<S, B, L, F> ActuatorPort for HardwareAdapter<S, B, L, F>
where
    B: OutputPin,
    L: OutputPin,
    F: SetDutyCycle,
{
    fn set_buzzer(&mut self, on: bool) {
        self.buzzer.set(on).ok();
    }

    fn set_led(&mut self, on: bool) {
        self.led.set(on).ok();
    }

    fn set_fan_pwm(&mut self, duty: u8) {
        self.fan.set(duty).ok();
    }

    fn all_off(&mut self) {
        self.buzzer.set(false).ok();
        self.led.set(false).ok();
        self.fan.stop().ok();
    }
}
