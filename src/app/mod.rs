//! Application core: pure domain logic, zero I/O.
//!
//! Wires the classifier, alarm and fan controllers into one per-tick
//! pipeline. All interaction with hardware happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod events;
pub mod ports;
pub mod service;
