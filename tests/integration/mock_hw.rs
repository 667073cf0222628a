//! Mock adapters for integration tests.
//!
//! `MockHardware` serves a settable sensor result and records every
//! actuator call so tests can assert on the full command history.
//! `MockClock` advances only through `delay_ms`; `RecordingSink` keeps
//! every emitted event.

use thermowatch::app::events::MonitorEvent;
use thermowatch::app::ports::{ActuatorPort, ClockPort, EventSink, SensorPort};
use thermowatch::error::SensorError;
use thermowatch::sensors::Sample;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Buzzer(bool),
    Led(bool),
    FanPwm(u8),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// Returned by every sensor read until changed.
    pub reading: Result<Sample, SensorError>,
    pub reads: u32,
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            reading: Err(SensorError::Timeout),
            reads: 0,
            calls: Vec::new(),
        }
    }

    pub fn at(temperature_c: f32) -> Self {
        let mut hw = Self::new();
        hw.set_temperature(temperature_c);
        hw
    }

    pub fn set_temperature(&mut self, temperature_c: f32) {
        self.reading = Ok(Sample {
            temperature_c,
            humidity_pct: 40.0,
        });
    }

    pub fn fail(&mut self, error: SensorError) {
        self.reading = Err(error);
    }

    pub fn buzzer_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Buzzer(on) => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn led_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Led(on) => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn fan_pwm(&self) -> u8 {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::FanPwm(d) => Some(*d),
                _ => None,
            })
            .unwrap_or(0)
    }

    pub fn fan_writes(&self) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::FanPwm(d) => Some(*d),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read(&mut self, _now_ms: u64) -> Result<Sample, SensorError> {
        self.reads += 1;
        self.reading
    }
}

impl ActuatorPort for MockHardware {
    fn set_buzzer(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Buzzer(on));
    }

    fn set_led(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Led(on));
    }

    fn set_fan_pwm(&mut self, duty: u8) {
        self.calls.push(ActuatorCall::FanPwm(duty));
    }
}

// ── MockClock ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockClock {
    pub now_ms: u64,
    pub delays: Vec<u32>,
}

impl ClockPort for MockClock {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
        self.now_ms += u64::from(ms);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<MonitorEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&MonitorEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &MonitorEvent) {
        self.events.push(event.clone());
    }
}
