//! ThermoWatch firmware entry point.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                   │
//! │                                                           │
//! │  HardwareAdapter        LogEventSink      SystemClock     │
//! │  (Sensor+Actuator)      (EventSink)       (ClockPort)     │
//! │                                                           │
//! │  ─────────────── Port Trait Boundary ────────────────     │
//! │                                                           │
//! │  ┌─────────────────────────────────────────────────────┐  │
//! │  │            MonitorService (pure logic)              │  │
//! │  │  Classifier · Alarm · Fan · StatusReporter          │  │
//! │  └─────────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use esp_idf_svc::hal::delay::Ets;
use esp_idf_svc::hal::gpio::{AnyIOPin, AnyOutputPin, PinDriver, Pull};
use esp_idf_svc::hal::ledc::config::TimerConfig;
use esp_idf_svc::hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::Hertz;

use thermowatch::adapters::hardware::HardwareAdapter;
use thermowatch::adapters::log_sink::LogEventSink;
use thermowatch::adapters::time::SystemClock;
use thermowatch::app::ports::ClockPort;
use thermowatch::app::service::MonitorService;
use thermowatch::config::MonitorConfig;
use thermowatch::pins;
use thermowatch::sensors::dht11::Dht11;

/// Defaults, or a JSON override baked in at build time through
/// `THERMOWATCH_CONFIG_JSON`. Either way the result has been validated.
fn load_config() -> thermowatch::error::Result<MonitorConfig> {
    match option_env!("THERMOWATCH_CONFIG_JSON") {
        Some(json) => {
            info!("Using build-time config override");
            Ok(MonitorConfig::from_json(json.as_bytes())?)
        }
        None => {
            let config = MonitorConfig::default();
            config.validate()?;
            Ok(config)
        }
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    let config = load_config()?;

    // ── 2. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;

    // SAFETY: each GPIO number in `pins` is claimed exactly once, here.
    let (dht_pin, buzzer_pin, led_pin, fan_pin) = unsafe {
        (
            AnyIOPin::new(pins::DHT11_GPIO),
            AnyOutputPin::new(pins::BUZZER_GPIO),
            AnyOutputPin::new(pins::LED_GPIO),
            AnyOutputPin::new(pins::FAN_PWM_GPIO),
        )
    };

    let mut dht_line = PinDriver::input_output_od(dht_pin)?;
    dht_line.set_pull(Pull::Up)?;
    let dht = Dht11::new(dht_line, Ets);

    let buzzer = PinDriver::output(buzzer_pin)?;
    let led = PinDriver::output(led_pin)?;

    let fan_timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::new()
            .frequency(Hertz(pins::FAN_PWM_FREQ_HZ))
            .resolution(Resolution::Bits8),
    )?;
    let fan = LedcDriver::new(peripherals.ledc.channel0, &fan_timer, fan_pin)?;

    let mut hw = HardwareAdapter::new(dht, buzzer, led, fan);
    let mut clock = SystemClock::new();
    let mut sink = LogEventSink::new();

    // ── 3. Boot sequence and main loop ────────────────────────
    // A failed check is reported, not fatal: the loop holds the last valid
    // reading and keeps retrying the outputs.
    match hw.check(clock.now_ms()) {
        Ok(sample) => info!(
            "Hardware check passed ({:.1}\u{00b0}C, {:.0} %RH)",
            sample.temperature_c, sample.humidity_pct
        ),
        Err(e) => warn!("Hardware check failed: {}", e),
    }

    let mut service = MonitorService::new(config);
    service.start(&mut hw, &mut sink);
    service.self_test(&mut hw, &mut clock, &mut sink);

    info!("Entering main loop");
    service.run(&mut hw, &mut clock, &mut sink)
}
