//! Time and Delay Abstractions for Embedded Systems
//!
//! The uplink has two blocking loops (bounded link acquisition and the
//! session retry loop). Both take their pauses from a [`Delay`] instead of
//! sleeping directly, so tests can drive them without real-time waits and
//! firmware can route them to a hardware timer.
//!
//! ## Common Implementations
//!
//! - `StdDelay`: `std::thread::sleep`
//! - `RecordingDelay`: returns immediately and records each requested pause
//! - `SystemTime`: wall clock seconds since the Unix epoch
//! - `FixedTime`: controllable time for testing

use crate::time::Timestamp;

/// Source of time for stamping readings
///
/// ## Example Implementation
///
/// ```rust
/// use motorwatch_core::traits::TimeSource;
/// use motorwatch_core::time::Timestamp;
///
/// struct RtcTimeSource {
///     // ... RTC peripheral
/// }
///
/// impl TimeSource for RtcTimeSource {
///     fn now(&self) -> Timestamp {
///         // Read seconds from the battery-backed RTC
///         0 // placeholder
///     }
/// }
/// ```
pub trait TimeSource {
    /// Current timestamp
    ///
    /// Wall clock sources return seconds since the Unix epoch; counters
    /// return whatever unit they count in. Successive calls never go
    /// backwards.
    fn now(&self) -> Timestamp;
}

/// Blocking pause used by every retry and poll loop
///
/// Implementations block the calling thread for (at least) the requested
/// duration. There is no cancellation: a loop that calls `delay_ms` runs to
/// completion.
pub trait Delay {
    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}
