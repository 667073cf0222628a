//! Integration tests for the sensor → classifier → alarm/fan → report pipeline.
//!
//! Drives `MonitorService` tick by tick against `MockHardware` and checks
//! both the actuator writes and the emitted events.

use crate::mock_hw::{ActuatorCall, MockClock, MockHardware, RecordingSink};

use thermowatch::app::events::{MonitorEvent, SelfTestStage};
use thermowatch::app::service::MonitorService;
use thermowatch::config::MonitorConfig;
use thermowatch::control::classifier::Tier;
use thermowatch::error::SensorError;

fn make_service() -> (MonitorService, RecordingSink) {
    (MonitorService::new(MonitorConfig::default()), RecordingSink::new())
}

// ── Tiers and fan over a heating / cooling trace ──────────────

#[test]
fn heating_then_cooling_trace() {
    let (mut svc, mut sink) = make_service();
    let mut hw = MockHardware::new();

    let temps = [20.0, 30.0, 42.0, 42.0, 38.0, 38.0];
    let mut tiers = Vec::new();
    let mut running = Vec::new();
    let mut pwm = Vec::new();

    for (i, t) in temps.into_iter().enumerate() {
        hw.set_temperature(t);
        let snap = svc.tick(i as u64 * 1000, &mut hw, &mut sink);
        tiers.push(snap.tier);
        running.push(snap.fan_running);
        pwm.push(hw.fan_pwm());
    }

    use Tier::*;
    assert_eq!(tiers, [Normal, Elevated, High, High, Elevated, Elevated]);
    assert_eq!(running, [false, false, true, true, false, false]);
    // Ramp starts at the floor; 42 °C after the ramp is 100 + trunc(155 * 0.2).
    assert_eq!(pwm, [0, 0, 100, 131, 0, 0]);
}

#[test]
fn fan_edges_emit_events_with_temperature() {
    let (mut svc, mut sink) = make_service();
    let mut hw = MockHardware::at(42.0);
    svc.tick(0, &mut hw, &mut sink);
    hw.set_temperature(38.0);
    svc.tick(1000, &mut hw, &mut sink);

    assert!(sink.events.contains(&MonitorEvent::FanActivated { temperature_c: 42.0 }));
    assert!(sink.events.contains(&MonitorEvent::FanDeactivated { temperature_c: 38.0 }));
}

#[test]
fn tier_changes_are_reported_once() {
    let (mut svc, mut sink) = make_service();
    let mut hw = MockHardware::at(20.0);
    svc.tick(0, &mut hw, &mut sink);
    hw.set_temperature(30.0);
    svc.tick(100, &mut hw, &mut sink);
    svc.tick(200, &mut hw, &mut sink);

    let changes: Vec<_> = sink
        .events
        .iter()
        .filter(|e| matches!(e, MonitorEvent::TierChanged { .. }))
        .collect();
    assert_eq!(
        changes,
        [&MonitorEvent::TierChanged {
            from: Tier::Normal,
            to: Tier::Elevated
        }]
    );
}

#[test]
fn dead_zone_does_not_chatter() {
    let (mut svc, mut sink) = make_service();
    let mut hw = MockHardware::at(40.0);
    svc.tick(0, &mut hw, &mut sink);

    for (i, t) in [39.5, 40.0, 39.5, 39.9, 39.1].into_iter().enumerate() {
        hw.set_temperature(t);
        let snap = svc.tick(1000 + i as u64 * 1000, &mut hw, &mut sink);
        assert!(snap.fan_running, "fan stopped at {t}");
        assert_eq!(snap.fan_pwm, 100);
    }
    assert_eq!(
        sink.count(|e| matches!(e, MonitorEvent::FanActivated { .. })),
        1
    );
    assert_eq!(
        sink.count(|e| matches!(e, MonitorEvent::FanDeactivated { .. })),
        0
    );
}

// ── Sensor failures ───────────────────────────────────────────

#[test]
fn failed_read_holds_last_temperature_and_fan_speed() {
    let (mut svc, mut sink) = make_service();
    let mut hw = MockHardware::at(42.0);
    svc.tick(0, &mut hw, &mut sink);
    svc.tick(600, &mut hw, &mut sink);
    assert_eq!(hw.fan_pwm(), 131);

    hw.fail(SensorError::ChecksumMismatch);
    let snap = svc.tick(700, &mut hw, &mut sink);

    assert!(!snap.sensor_ok);
    assert_eq!(snap.temperature_c, 42.0);
    assert_eq!(snap.tier, Tier::High);
    assert_eq!(hw.fan_pwm(), 131);
    assert!(sink.events.contains(&MonitorEvent::SensorFault { substituted_c: 42.0 }));
    assert!(svc.alarm().is_active());
}

#[test]
fn nan_reading_is_a_fault() {
    let (mut svc, mut sink) = make_service();
    let mut hw = MockHardware::at(30.0);
    svc.tick(0, &mut hw, &mut sink);
    hw.set_temperature(f32::NAN);
    let snap = svc.tick(100, &mut hw, &mut sink);

    assert!(!snap.sensor_ok);
    assert_eq!(snap.temperature_c, 30.0);
    assert_eq!(snap.tier, Tier::Elevated);
}

#[test]
fn failure_before_first_sample_reads_as_zero() {
    let (mut svc, mut sink) = make_service();
    let mut hw = MockHardware::new();
    let snap = svc.tick(0, &mut hw, &mut sink);

    assert_eq!(snap.temperature_c, 0.0);
    assert_eq!(snap.tier, Tier::Normal);
    assert!(!snap.fan_running);
    assert!(sink.events.contains(&MonitorEvent::SensorFault { substituted_c: 0.0 }));
}

#[test]
fn sensor_is_read_once_per_tick() {
    let (mut svc, mut sink) = make_service();
    let mut hw = MockHardware::at(25.0);
    for t in 0..10 {
        svc.tick(t * 100, &mut hw, &mut sink);
    }
    assert_eq!(hw.reads, 10);
    assert_eq!(svc.tick_count(), 10);
}

// ── Alarm raise / clear ───────────────────────────────────────

#[test]
fn alarm_clears_when_pulse_ends_back_in_normal() {
    let (mut svc, mut sink) = make_service();
    let mut hw = MockHardware::at(45.0);
    svc.tick(0, &mut hw, &mut sink);
    assert!(sink.events.contains(&MonitorEvent::AlarmRaised(Tier::High)));

    hw.set_temperature(20.0);
    svc.tick(100, &mut hw, &mut sink);
    // Pulse still running, alarm still flagged.
    assert!(svc.alarm().is_active());
    assert!(hw.buzzer_on());

    svc.tick(200, &mut hw, &mut sink);
    assert!(!svc.alarm().is_active());
    assert!(!hw.buzzer_on());
    assert!(sink.events.contains(&MonitorEvent::AlarmCleared));
}

// ── Reporting ─────────────────────────────────────────────────

#[test]
fn status_reported_every_three_seconds() {
    let (mut svc, mut sink) = make_service();
    let mut hw = MockHardware::at(30.0);
    for t in (0..=9000).step_by(100) {
        svc.tick(t, &mut hw, &mut sink);
    }

    let uptimes: Vec<u64> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            MonitorEvent::Status(r) => Some(r.uptime_ms),
            _ => None,
        })
        .collect();
    assert_eq!(uptimes, [0, 3000, 6000, 9000]);
}

#[test]
fn report_reflects_same_tick_actuation() {
    let (mut svc, mut sink) = make_service();
    let mut hw = MockHardware::at(50.0);
    svc.tick(0, &mut hw, &mut sink);
    svc.tick(3000, &mut hw, &mut sink);

    let Some(MonitorEvent::Status(report)) = sink
        .events
        .iter()
        .rev()
        .find(|e| matches!(e, MonitorEvent::Status(_)))
    else {
        panic!("no status report");
    };
    assert_eq!(report.fan_pwm, 255);
    assert_eq!(report.fan_speed_pct(), 100);
    assert_eq!(report.tier, Tier::High);
}

// ── Lifecycle ─────────────────────────────────────────────────

#[test]
fn start_turns_everything_off_and_announces_config() {
    let (mut svc, mut sink) = make_service();
    let mut hw = MockHardware::new();
    svc.start(&mut hw, &mut sink);

    assert_eq!(
        hw.calls,
        [
            ActuatorCall::Buzzer(false),
            ActuatorCall::Led(false),
            ActuatorCall::FanPwm(0)
        ]
    );
    assert_eq!(
        sink.events,
        [MonitorEvent::Started(MonitorConfig::default())]
    );
}

#[test]
fn self_test_flashes_then_spins_fan() {
    let (mut svc, mut sink) = make_service();
    let mut hw = MockHardware::new();
    let mut clock = MockClock::default();
    svc.self_test(&mut hw, &mut clock, &mut sink);

    let buzzer_on = hw
        .calls
        .iter()
        .filter(|c| **c == ActuatorCall::Buzzer(true))
        .count();
    assert_eq!(buzzer_on, 5);
    assert_eq!(hw.fan_writes(), [100, 200, 0]);
    assert_eq!(clock.now_ms, 5 * 200 + 2000);
    assert!(!hw.buzzer_on());
    assert!(!hw.led_on());

    assert_eq!(
        sink.events,
        [
            MonitorEvent::SelfTest(SelfTestStage::Alarm),
            MonitorEvent::SelfTest(SelfTestStage::Fan),
            MonitorEvent::SelfTest(SelfTestStage::Complete),
        ]
    );
}
