//! Buzzer / LED pulse timing through the full service.

use crate::mock_hw::{MockHardware, RecordingSink};

use thermowatch::app::service::MonitorService;
use thermowatch::config::MonitorConfig;

/// Tick every `step_ms` up to and including `until_ms`; return the times at
/// which the buzzer switched on.
fn pulse_starts(
    hw: &mut MockHardware,
    svc: &mut MonitorService,
    from_ms: u64,
    until_ms: u64,
    step_ms: u64,
) -> Vec<u64> {
    let mut sink = RecordingSink::new();
    let mut starts = Vec::new();
    let mut was_on = hw.buzzer_on();
    let mut t = from_ms;
    while t <= until_ms {
        svc.tick(t, hw, &mut sink);
        let on = hw.buzzer_on();
        assert_eq!(on, hw.led_on(), "LED must mirror buzzer at {t}");
        if on && !was_on {
            starts.push(t);
        }
        was_on = on;
        t += step_ms;
    }
    starts
}

fn service() -> MonitorService {
    MonitorService::new(MonitorConfig::default())
}

#[test]
fn normal_pulses_every_five_seconds() {
    let mut hw = MockHardware::at(20.0);
    let starts = pulse_starts(&mut hw, &mut service(), 0, 10_000, 100);
    assert_eq!(starts, [0, 5000, 10_000]);
}

#[test]
fn elevated_pulses_every_two_seconds() {
    let mut hw = MockHardware::at(30.0);
    let starts = pulse_starts(&mut hw, &mut service(), 0, 6000, 100);
    assert_eq!(starts, [0, 2000, 4000, 6000]);
}

#[test]
fn high_pulses_every_half_second() {
    let mut hw = MockHardware::at(45.0);
    let starts = pulse_starts(&mut hw, &mut service(), 0, 2000, 100);
    assert_eq!(starts, [0, 500, 1000, 1500, 2000]);
}

#[test]
fn pulse_lasts_two_hundred_ms() {
    let mut hw = MockHardware::at(45.0);
    let mut svc = service();
    let mut sink = RecordingSink::new();
    let mut on_ticks = Vec::new();
    for t in (0..500).step_by(50) {
        svc.tick(t, &mut hw, &mut sink);
        if hw.buzzer_on() {
            on_ticks.push(t);
        }
    }
    assert_eq!(on_ticks, [0, 50, 100, 150]);
}

#[test]
fn escalation_uses_new_cadence_from_last_pulse() {
    let mut hw = MockHardware::at(20.0);
    let mut svc = service();
    assert_eq!(pulse_starts(&mut hw, &mut svc, 0, 200, 100), [0]);

    hw.set_temperature(45.0);
    let starts = pulse_starts(&mut hw, &mut svc, 300, 1200, 100);
    assert_eq!(starts, [500, 1000]);
}
