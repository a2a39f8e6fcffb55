//! Time management for the uplink
//!
//! Provides clock and delay implementations:
//! - System clock (when `std` is available)
//! - Fixed clock (for tests and replay)
//! - Thread-sleep delay (when `std` is available)
//! - Recording delay (for tests of the retry loops)

use alloc::vec::Vec;

pub use crate::traits::time::{Delay, TimeSource};

/// Timestamp carried by a reading (seconds since epoch, or a device counter)
pub type Timestamp = u64;

/// System time source (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone, Default)]
pub struct SystemTime;

#[cfg(feature = "std")]
impl TimeSource for SystemTime {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime as StdSystemTime, UNIX_EPOCH};

        StdSystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

/// Fixed time source for testing
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    pub fn advance(&mut self, delta: u64) {
        self.timestamp = self.timestamp.saturating_add(delta);
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}

/// Delay backed by `std::thread::sleep`
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

#[cfg(feature = "std")]
impl Delay for StdDelay {
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}

/// Delay that returns immediately and records every requested pause
///
/// Lets tests assert on the exact pacing of a retry loop.
#[derive(Debug, Clone, Default)]
pub struct RecordingDelay {
    pauses: Vec<u32>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every pause requested so far, in order
    pub fn pauses(&self) -> &[u32] {
        &self.pauses
    }

    /// Number of pauses requested
    pub fn count(&self) -> usize {
        self.pauses.len()
    }

    /// Sum of all requested pauses (milliseconds)
    pub fn total_ms(&self) -> u64 {
        self.pauses.iter().map(|&ms| u64::from(ms)).sum()
    }
}

impl Delay for RecordingDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.pauses.push(ms);
    }
}
