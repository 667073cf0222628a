//! Cooling fan driver.
//!
//! The fan runs off a PWM channel (LEDC on the ESP32) through a logic-level
//! MOSFET. The domain works in 8-bit duty (0–255); the driver rescales that
//! onto whatever resolution the channel was configured with via
//! [`SetDutyCycle::set_duty_cycle_fraction`].

use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::error::ActuatorError;

/// Full scale of the duty values the domain hands us.
pub const DUTY_FULL_SCALE: u16 = 255;

pub struct FanPwm<C> {
    channel: C,
    duty: u8,
}

impl<C: SetDutyCycle> FanPwm<C> {
    pub fn new(channel: C) -> Self {
        Self { channel, duty: 0 }
    }

    pub fn set(&mut self, duty: u8) -> Result<(), ActuatorError> {
        match self
            .channel
            .set_duty_cycle_fraction(u16::from(duty), DUTY_FULL_SCALE)
        {
            Ok(()) => {
                self.duty = duty;
                Ok(())
            }
            Err(_) => {
                warn!("fan: PWM write failed (wanted duty {})", duty);
                Err(ActuatorError::PwmWriteFailed)
            }
        }
    }

    pub fn stop(&mut self) -> Result<(), ActuatorError> {
        self.set(0)
    }

    /// Last duty successfully written.
    pub fn current_duty(&self) -> u8 {
        self.duty
    }

    pub fn is_running(&self) -> bool {
        self.duty > 0
    }
}
