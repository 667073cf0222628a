//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the `log`
//! facade (UART / USB-CDC on the device). Status reports come out twice: a
//! human-readable block at `info` and a one-line JSON record at `debug` for
//! anything scraping the console.

use log::{debug, info, warn};

use crate::app::events::{MonitorEvent, SelfTestStage};
use crate::app::ports::EventSink;
use crate::config::MonitorConfig;
use crate::status::StatusReport;

/// Adapter that logs every [`MonitorEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

fn banner(config: &MonitorConfig) {
    info!("=== ThermoWatch v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "NORMAL   (<= {:.1}\u{00b0}C): short beep every {:.1} s",
        config.normal_max_c,
        f64::from(config.normal_cadence_ms) / 1000.0
    );
    info!(
        "ELEVATED ({:.1}-{:.1}\u{00b0}C): beep every {:.1} s",
        config.normal_max_c,
        config.fan_on_c,
        f64::from(config.elevated_cadence_ms) / 1000.0
    );
    info!(
        "HIGH     (>= {:.1}\u{00b0}C): beep every {:.1} s",
        config.fan_on_c,
        f64::from(config.high_cadence_ms) / 1000.0
    );
    info!(
        "Fan on at {:.1}\u{00b0}C, off below {:.1}\u{00b0}C, full speed at {:.1}\u{00b0}C",
        config.fan_on_c,
        config.fan_off_c(),
        config.max_temp_c
    );
}

fn status_block(r: &StatusReport) {
    info!("--- status @ {:.1} s ---", r.uptime_ms as f64 / 1000.0);
    info!(
        "Temperature: {:.1}\u{00b0}C / {:.1}\u{00b0}F / {:.2} K{}",
        r.temperature_c,
        r.temperature_f(),
        r.temperature_k(),
        if r.sensor_ok { "" } else { " (held, sensor fault)" }
    );
    info!("Humidity:    {:.1} %", r.humidity_pct);
    info!("Tier:        {}", r.tier);
    info!(
        "Buzzer:      {}{}",
        r.alarm_mode.label(),
        if r.alarm_active { " (alarm active)" } else { "" }
    );
    if r.fan_running {
        info!("Fan:         ON {}% (PWM {})", r.fan_speed_pct(), r.fan_pwm);
    } else {
        info!("Fan:         OFF");
    }

    match serde_json::to_string(r) {
        Ok(json) => debug!("TELEM {}", json),
        Err(e) => warn!("TELEM encode failed: {}", e),
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &MonitorEvent) {
        match event {
            MonitorEvent::Started(config) => banner(config),
            MonitorEvent::SensorFault { substituted_c } => {
                warn!("SENSOR | read failed, holding {:.1}\u{00b0}C", substituted_c);
            }
            MonitorEvent::TierChanged { from, to } => {
                info!("TIER | {} -> {}", from, to);
            }
            MonitorEvent::AlarmRaised(tier) => {
                info!("ALARM | raised at {}", tier);
            }
            MonitorEvent::AlarmCleared => {
                info!("ALARM | cleared");
            }
            MonitorEvent::FanActivated { temperature_c } => {
                info!("FAN | on at {:.1}\u{00b0}C", temperature_c);
            }
            MonitorEvent::FanDeactivated { temperature_c } => {
                info!("FAN | off at {:.1}\u{00b0}C", temperature_c);
            }
            MonitorEvent::Status(report) => status_block(report),
            MonitorEvent::SelfTest(stage) => match stage {
                SelfTestStage::Alarm => info!("SELFTEST | buzzer + LED"),
                SelfTestStage::Fan => info!("SELFTEST | fan"),
                SelfTestStage::Complete => info!("SELFTEST | complete"),
            },
        }
    }
}
