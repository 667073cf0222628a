//! Monitor service: the hexagonal core and main loop.
//!
//! [`MonitorService`] owns every controller and runs them in a fixed order
//! once per tick. All I/O flows through port traits injected at call sites,
//! making the whole loop testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ SensorSource ──▶ ThermalClassifier ──▶ AlarmController ──┐
//!                      │                                 FanController ────┤──▶ ActuatorPort
//!                      └────────────────────────────────▶ StatusReporter ──┴──▶ EventSink
//! ```
//!
//! One tick sees exactly one [`Reading`] and one clock value. Reporting
//! happens last so it can never hold up actuation.

use log::info;

use crate::config::MonitorConfig;
use crate::control::alarm::AlarmController;
use crate::control::classifier::{ThermalClassifier, Tier};
use crate::control::fan::FanController;
use crate::sensors::{Reading, SensorSource};
use crate::status::{StatusReport, StatusReporter};

use super::events::{MonitorEvent, SelfTestStage};
use super::ports::{ActuatorPort, ClockPort, EventSink, SensorPort};

/// The application service orchestrates all domain logic.
pub struct MonitorService {
    config: MonitorConfig,
    source: SensorSource,
    classifier: ThermalClassifier,
    alarm: AlarmController,
    fan: FanController,
    reporter: StatusReporter,
    /// Tier of the previous tick; `None` before the first.
    tier: Option<Tier>,
    last_reading: Option<Reading>,
    tick_count: u64,
}

impl MonitorService {
    /// Construct the service. Expects an already validated config.
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            source: SensorSource::new(),
            classifier: ThermalClassifier::new(&config),
            alarm: AlarmController::new(&config),
            fan: FanController::new(&config),
            reporter: StatusReporter::new(config.report_interval_ms),
            tier: None,
            last_reading: None,
            tick_count: 0,
            config,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Put every output into its idle state and announce the thresholds.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.all_off();
        sink.emit(&MonitorEvent::Started(self.config.clone()));
        info!("MonitorService started");
    }

    /// Exercise buzzer, LED and fan so an installer can hear and see them.
    ///
    /// Blocks for a little over three seconds; call before entering [`run`](Self::run).
    pub fn self_test(
        &mut self,
        hw: &mut impl ActuatorPort,
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        sink.emit(&MonitorEvent::SelfTest(SelfTestStage::Alarm));
        for _ in 0..5 {
            hw.set_buzzer(true);
            hw.set_led(true);
            clock.delay_ms(100);
            hw.set_buzzer(false);
            hw.set_led(false);
            clock.delay_ms(100);
        }

        sink.emit(&MonitorEvent::SelfTest(SelfTestStage::Fan));
        hw.set_fan_pwm(100);
        clock.delay_ms(1000);
        hw.set_fan_pwm(200);
        clock.delay_ms(1000);
        hw.set_fan_pwm(0);

        sink.emit(&MonitorEvent::SelfTest(SelfTestStage::Complete));
    }

    /// Tick forever with the configured sleep between iterations.
    pub fn run(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        clock: &mut impl ClockPort,
        sink: &mut impl EventSink,
    ) -> ! {
        loop {
            let now_ms = clock.now_ms();
            self.tick(now_ms, hw, sink);
            clock.delay_ms(self.config.loop_delay_ms);
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full iteration: read → classify → alarm → fan → report.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`], avoiding a double mutable borrow while keeping
    /// the port boundary explicit. Returns this tick's snapshot whether or
    /// not it was due for reporting.
    pub fn tick(
        &mut self,
        now_ms: u64,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> StatusReport {
        self.tick_count += 1;

        // 1. Sensor, with last-valid substitution
        let reading = self.source.read(hw, now_ms);
        if !reading.valid {
            sink.emit(&MonitorEvent::SensorFault {
                substituted_c: reading.temperature_c,
            });
        }
        self.last_reading = Some(reading);

        // 2. Classification
        let tier = self.classifier.classify(reading.temperature_c);
        if let Some(prev) = self.tier {
            if prev != tier {
                sink.emit(&MonitorEvent::TierChanged { from: prev, to: tier });
            }
        }
        self.tier = Some(tier);

        // 3. Alarm
        let was_active = self.alarm.is_active();
        let alarm = self.alarm.tick(tier, now_ms);
        hw.set_buzzer(alarm.on);
        hw.set_led(alarm.on);
        match (was_active, self.alarm.is_active()) {
            (false, true) => sink.emit(&MonitorEvent::AlarmRaised(tier)),
            (true, false) => sink.emit(&MonitorEvent::AlarmCleared),
            _ => {}
        }

        // 4. Fan
        let was_running = self.fan.is_running();
        let pwm = self.fan.tick(reading.temperature_c, now_ms);
        hw.set_fan_pwm(pwm);
        match (was_running, self.fan.is_running()) {
            (false, true) => sink.emit(&MonitorEvent::FanActivated {
                temperature_c: reading.temperature_c,
            }),
            (true, false) => sink.emit(&MonitorEvent::FanDeactivated {
                temperature_c: reading.temperature_c,
            }),
            _ => {}
        }

        // 5. Reporting
        let snapshot = StatusReport {
            uptime_ms: now_ms,
            tier,
            temperature_c: reading.temperature_c,
            humidity_pct: reading.humidity_pct,
            sensor_ok: reading.valid,
            alarm_mode: self.alarm.mode(),
            alarm_active: self.alarm.is_active(),
            fan_running: self.fan.is_running(),
            fan_pwm: pwm,
        };
        if let Some(report) = self.reporter.tick(now_ms, snapshot) {
            sink.emit(&MonitorEvent::Status(report));
        }
        snapshot
    }

    // ── Queries ───────────────────────────────────────────────

    /// Tier of the last tick; `None` before the first.
    pub fn tier(&self) -> Option<Tier> {
        self.tier
    }

    pub fn last_reading(&self) -> Option<Reading> {
        self.last_reading
    }

    pub fn alarm(&self) -> &AlarmController {
        &self.alarm
    }

    pub fn fan(&self) -> &FanController {
        &self.fan
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Total ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
