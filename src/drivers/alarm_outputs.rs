//! Buzzer and indicator LED drivers.
//!
//! Both are plain active-high digital outputs driven together by the alarm
//! pulse. Generic over embedded-hal 1.0 [`OutputPin`], so the board uses
//! `PinDriver<Output>` and tests use a recording mock.
//!
//! A failed write is logged and reported; the caller decides whether to
//! care. The cached level only changes when the write succeeded.

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

use crate::error::ActuatorError;

pub struct SignalOutput<P> {
    pin: P,
    name: &'static str,
    on: bool,
}

impl<P: OutputPin> SignalOutput<P> {
    pub fn new(pin: P, name: &'static str) -> Self {
        Self {
            pin,
            name,
            on: false,
        }
    }

    /// A piezo buzzer on `pin`.
    pub fn buzzer(pin: P) -> Self {
        Self::new(pin, "buzzer")
    }

    /// An indicator LED on `pin`.
    pub fn led(pin: P) -> Self {
        Self::new(pin, "led")
    }

    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        match self.pin.set_state(PinState::from(on)) {
            Ok(()) => {
                self.on = on;
                Ok(())
            }
            Err(_) => {
                warn!("{}: GPIO write failed (wanted {})", self.name, on);
                Err(ActuatorError::GpioWriteFailed)
            }
        }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}
