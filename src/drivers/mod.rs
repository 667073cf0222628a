//! Actuator drivers over embedded-hal 1.0 traits.

pub mod alarm_outputs;
pub mod fan_pwm;
