//! System clock adapter.
//!
//! - **device build** (`target_os = "espidf"` with the `espidf` feature): `esp_timer_get_time()` (µs since boot,
//!   monotonic) and a FreeRTOS task delay, which yields to other tasks
//!   instead of spinning.
//! - **anything else**: `std::time::Instant` and
//!   `thread::sleep`, for host-side simulation.

use crate::app::ports::ClockPort;

pub struct SystemClock {
    #[cfg(not(all(target_os = "espidf", feature = "espidf")))]
    start: std::time::Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(all(target_os = "espidf", feature = "espidf")))]
            start: std::time::Instant::now(),
        }
    }
}

#[cfg(all(target_os = "espidf", feature = "espidf"))]
impl ClockPort for SystemClock {
    fn now_ms(&self) -> u64 {
        // SAFETY: read-only query of the high-resolution timer, valid once
        // the IDF has booted.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1000
    }

    fn delay_ms(&mut self, ms: u32) {
        esp_idf_svc::hal::delay::FreeRtos::delay_ms(ms);
    }
}

#[cfg(not(all(target_os = "espidf", feature = "espidf")))]
impl ClockPort for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
