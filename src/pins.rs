//! GPIO / peripheral pin assignments for the ThermoWatch board (ESP32-C3).
//!
//! Single source of truth: `main` takes peripherals by these numbers and
//! nothing else hard-codes a pin.

// ---------------------------------------------------------------------------
// Sensor
// ---------------------------------------------------------------------------

/// DHT11 data line. Open-drain with an external 10 kΩ pull-up.
pub const DHT11_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Actuators
// ---------------------------------------------------------------------------

/// LEDC PWM output to the fan MOSFET gate.
pub const FAN_PWM_GPIO: i32 = 3;
/// Active piezo buzzer (active HIGH).
pub const BUZZER_GPIO: i32 = 4;
/// Alarm indicator LED (active HIGH).
pub const LED_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC base frequency for the fan (25 kHz, above audible range). The timer
/// runs at 8-bit resolution so duty maps 1:1 onto the domain's 0 – 255.
pub const FAN_PWM_FREQ_HZ: u32 = 25_000;
