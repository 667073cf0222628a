//! DHT11 temperature / humidity sensor (single-wire, open-drain).
//!
//! ```text
//!  host  ▔▔▔▔╲______18ms______╱▔▔
//!  dht                          ╲_80us_╱▔80us▔╲_50_╱▔26/70▔╲_50_ ... x40
//! ```
//!
//! The host pulls the line low for at least 18 ms, releases it, and the
//! sensor answers with an 80 µs low / 80 µs high preamble followed by 40
//! bits. Each bit is a 50 µs low gap then a high pulse of ~26 µs (0) or
//! ~70 µs (1). The fifth byte is the 8-bit sum of the first four.
//!
//! Bits are told apart by comparing each high pulse against the low gap
//! that precedes it, both measured in poll iterations. The gap is a fixed
//! ~50 µs, so whatever a poll costs on a given core cancels out.
//!
//! The part must not be polled faster than once every two seconds; reads
//! inside that window return the previous result without touching the bus.
//!
//! Generic over embedded-hal 1.0 so the same driver runs on ESP-IDF
//! (`PinDriver<InputOutput>` + `Ets`) and against host-side mocks.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use super::Sample;
use crate::app::ports::SensorPort;
use crate::error::SensorError;

/// Minimum spacing between bus transactions.
pub const MIN_READ_INTERVAL_MS: u64 = 2000;

const START_LOW_MS: u32 = 20;
/// Polls before an edge is declared missing. A poll takes at least 1 µs,
/// so this comfortably covers the longest (80 µs) phase.
const EDGE_TIMEOUT_POLLS: u32 = 100;

/// Decode a raw 5-byte frame.
///
/// Temperature follows the common DHT11 layout: integral degrees in byte 2,
/// tenths in the low nibble of byte 3, sign in bit 7 of byte 3.
///
/// An all-zero frame passes the checksum but is never a real reading (the
/// part cannot report 0 %RH); it is what a bus read as all `0` bits looks
/// like, so it is rejected.
pub fn decode(frame: &[u8; 5]) -> Result<Sample, SensorError> {
    if frame.iter().all(|&b| b == 0) {
        return Err(SensorError::BadFrame);
    }

    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::ChecksumMismatch);
    }

    let humidity_pct = f32::from(frame[0]) + f32::from(frame[1]) * 0.1;

    let mut temperature_c = f32::from(frame[2]);
    if frame[3] & 0x80 != 0 {
        temperature_c = -1.0 - temperature_c;
    }
    temperature_c += f32::from(frame[3] & 0x0f) * 0.1;

    Ok(Sample {
        temperature_c,
        humidity_pct,
    })
}

pub struct Dht11<P, D> {
    pin: P,
    delay: D,
    /// Time and outcome of the last bus transaction.
    last: Option<(u64, Result<Sample, SensorError>)>,
}

impl<P, D> Dht11<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    pub fn new(mut pin: P, delay: D) -> Self {
        // Idle level is released (pulled up).
        pin.set_high().ok();
        Self {
            pin,
            delay,
            last: None,
        }
    }

    /// Read temperature and humidity, rate-limited to one bus transaction
    /// per [`MIN_READ_INTERVAL_MS`].
    pub fn read(&mut self, now_ms: u64) -> Result<Sample, SensorError> {
        if let Some((at, result)) = self.last {
            if now_ms.saturating_sub(at) < MIN_READ_INTERVAL_MS {
                return result;
            }
        }
        let result = self.acquire().and_then(|frame| decode(&frame));
        self.last = Some((now_ms, result));
        result
    }

    /// Run one full transaction and return the raw frame.
    fn acquire(&mut self) -> Result<[u8; 5], SensorError> {
        self.pin.set_low().map_err(|_| SensorError::Gpio)?;
        self.delay.delay_ms(START_LOW_MS);
        self.pin.set_high().map_err(|_| SensorError::Gpio)?;

        let frame = self.read_frame();
        // Leave the bus released whatever happened.
        self.pin.set_high().ok();
        frame
    }

    fn read_frame(&mut self) -> Result<[u8; 5], SensorError> {
        // Wait for the sensor to take the line, then skip its preamble.
        self.wait_while(true, EDGE_TIMEOUT_POLLS)?;
        self.wait_while(false, EDGE_TIMEOUT_POLLS)?;
        self.wait_while(true, EDGE_TIMEOUT_POLLS)?;

        let mut frame = [0u8; 5];
        for bit in 0..40 {
            let low = self.wait_while(false, EDGE_TIMEOUT_POLLS)?;
            let high = self.wait_while(true, EDGE_TIMEOUT_POLLS)?;
            if low == 0 || high == 0 {
                return Err(SensorError::BadFrame);
            }
            // ~26 µs high is a 0, ~70 µs a 1, against a ~50 µs gap.
            if high > low {
                frame[bit / 8] |= 1 << (7 - bit % 8);
            }
        }
        Ok(frame)
    }

    /// Busy-wait while the line sits at `level`; returns the number of polls.
    fn wait_while(&mut self, level: bool, max_polls: u32) -> Result<u32, SensorError> {
        let mut polls = 0;
        while self.pin.is_high().map_err(|_| SensorError::Gpio)? == level {
            if polls >= max_polls {
                return Err(SensorError::Timeout);
            }
            self.delay.delay_us(1);
            polls += 1;
        }
        Ok(polls)
    }
}

impl<P, D> SensorPort for Dht11<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn read(&mut self, now_ms: u64) -> Result<Sample, SensorError> {
        Dht11::read(self, now_ms)
    }
}
