//! Fuzz target: DHT11 frame decoding
//!
//! Feeds arbitrary 5-byte frames through `dht11::decode` and checks:
//! - No panics under any input
//! - A frame is accepted exactly when its checksum byte matches and it is
//!   not all zeros
//! - Accepted frames decode to finite values inside the representable range
//!
//! cargo fuzz run fuzz_dht11_decode

#![no_main]

use libfuzzer_sys::fuzz_target;
use thermowatch::error::SensorError;
use thermowatch::sensors::dht11::decode;

fuzz_target!(|data: &[u8]| {
    let Ok(frame) = <[u8; 5]>::try_from(data) else {
        return;
    };

    let sum = frame[..4].iter().fold(0u8, |a, b| a.wrapping_add(*b));
    match decode(&frame) {
        Ok(s) => {
            assert_eq!(sum, frame[4]);
            assert_ne!(frame, [0; 5]);
            assert!(s.temperature_c.is_finite());
            assert!(s.humidity_pct.is_finite());
            assert!((-257.0..=257.0).contains(&s.temperature_c));
            assert!((0.0..=281.0).contains(&s.humidity_pct));
        }
        Err(SensorError::BadFrame) => assert_eq!(frame, [0; 5]),
        Err(e) => {
            assert_eq!(e, SensorError::ChecksumMismatch);
            assert_ne!(sum, frame[4]);
        }
    }
});
