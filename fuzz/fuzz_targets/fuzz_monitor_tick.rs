//! Fuzz target: `MonitorService::tick` under arbitrary sensor traces
//!
//! Each input byte pair is one tick: a time step and a temperature (or a
//! read failure). Verifies:
//! - No panics for any trace, NaN and failures included
//! - A running fan is always driven within [FAN_START_PWM, FAN_MAX_PWM]
//! - A stopped fan is always driven at 0
//!
//! cargo fuzz run fuzz_monitor_tick

#![no_main]

use libfuzzer_sys::fuzz_target;
use thermowatch::app::events::MonitorEvent;
use thermowatch::app::ports::{ActuatorPort, EventSink, SensorPort};
use thermowatch::app::service::MonitorService;
use thermowatch::config::{MonitorConfig, FAN_MAX_PWM, FAN_START_PWM};
use thermowatch::error::SensorError;
use thermowatch::sensors::Sample;

struct Rig {
    next: Result<Sample, SensorError>,
    pwm: u8,
}

impl SensorPort for Rig {
    fn read(&mut self, _now_ms: u64) -> Result<Sample, SensorError> {
        self.next
    }
}

impl ActuatorPort for Rig {
    fn set_buzzer(&mut self, _on: bool) {}
    fn set_led(&mut self, _on: bool) {}
    fn set_fan_pwm(&mut self, duty: u8) {
        self.pwm = duty;
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &MonitorEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let mut svc = MonitorService::new(MonitorConfig::default());
    let mut rig = Rig {
        next: Err(SensorError::Timeout),
        pwm: 0,
    };
    let mut now = 0u64;

    for pair in data.chunks_exact(2) {
        now += u64::from(pair[0]) * 10;
        rig.next = match pair[1] {
            255 => Err(SensorError::Timeout),
            254 => Ok(Sample {
                temperature_c: f32::NAN,
                humidity_pct: 50.0,
            }),
            raw => Ok(Sample {
                temperature_c: f32::from(raw) * 0.5 - 20.0,
                humidity_pct: 50.0,
            }),
        };

        let snap = svc.tick(now, &mut rig, &mut Discard);
        assert_eq!(snap.fan_pwm, rig.pwm);
        if snap.fan_running {
            assert!((FAN_START_PWM..=FAN_MAX_PWM).contains(&rig.pwm));
        } else {
            assert_eq!(rig.pwm, 0);
        }
    }
});
