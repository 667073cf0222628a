//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                    |
//! |------------|---------------|--------------------------------|
//! | `hardware` | SensorPort    | DHT11 (single-wire GPIO)       |
//! |            | ActuatorPort  | buzzer + LED GPIO, fan LEDC PWM|
//! | `log_sink` | EventSink     | Serial log output              |
//! | `time`     | ClockPort     | ESP32 system timer / FreeRTOS  |

pub mod hardware;
pub mod log_sink;
pub mod time;
