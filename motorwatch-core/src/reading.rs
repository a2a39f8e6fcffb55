//! Sensor readings
//!
//! A [`Reading`] is one sampling cycle's worth of motor telemetry. The
//! acquisition routine hands four already-sampled scalars to the uplink,
//! which stamps them and passes the value to exactly one delivery call.
//! Readings are never queued: if delivery fails the reading is dropped.

use serde::{Deserialize, Serialize};

use crate::time::{TimeSource, Timestamp};

/// One sampled set of motor scalars plus a timestamp
///
/// The serialized form is the wire schema the collectors expect:
///
/// ```json
/// { "temperature": 65.5, "vibration": 0.02, "rpm": 1500, "timestamp": 1000000 }
/// ```
///
/// Field order carries no meaning; every field is keyed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Winding temperature (°C)
    pub temperature: f32,
    /// Vibration magnitude (m/s²)
    pub vibration: f32,
    /// Shaft speed (revolutions per minute)
    pub rpm: i32,
    /// Sample time; monotonically non-decreasing across readings
    pub timestamp: Timestamp,
}

impl Reading {
    /// Build a reading from already-sampled values
    pub fn new(temperature: f32, vibration: f32, rpm: i32, timestamp: Timestamp) -> Self {
        Self {
            temperature,
            vibration,
            rpm,
            timestamp,
        }
    }

    /// Build a reading stamped with the current time of `clock`
    pub fn sampled_now(temperature: f32, vibration: f32, rpm: i32, clock: &dyn TimeSource) -> Self {
        Self::new(temperature, vibration, rpm, clock.now())
    }

    /// Name of the first float field that cannot go on the wire, if any
    pub fn non_finite_field(&self) -> Option<&'static str> {
        if !self.temperature.is_finite() {
            Some("temperature")
        } else if !self.vibration.is_finite() {
            Some("vibration")
        } else {
            None
        }
    }
}
