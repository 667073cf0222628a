//! Thermal policy: classification, alarm cadence, and fan modulation.
//!
//! All three are plain state machines with no I/O. They take the tick's
//! temperature (or tier) and clock reading and return what the outputs
//! should be; [`MonitorService`](crate::app::service::MonitorService)
//! writes those outputs through the actuator port.

pub mod alarm;
pub mod classifier;
pub mod fan;
