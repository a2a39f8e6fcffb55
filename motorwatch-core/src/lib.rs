//! Core of the MotorWatch telemetry uplink
//!
//! Moves motor readings (temperature, vibration, rpm, timestamp) from a
//! networked device to a remote collector. This crate holds everything that
//! does not depend on a particular collector protocol:
//!
//! - [`link`]: bounded wireless link acquisition
//! - [`encoder`]: the keyed wire document for readings and responses
//! - [`outcome`]: typed per-send results and counters
//! - [`traits::Transport`]: the seam the two delivery strategies plug into
//! - [`uplink`]: the start / deliver / service control flow
//!
//! Key constraints:
//! - Single thread of control, blocking calls, one send in flight
//! - Every blocking pause goes through an injectable [`Delay`]
//! - Failures are returned as [`DeliveryOutcome`] values, never panics
//!
//! ```no_run
//! use motorwatch_core::{Reading, ReadingEncoder};
//!
//! let reading = Reading::new(65.5, 0.02, 1500, 1_000_000);
//! let payload = ReadingEncoder::new().encode(&reading).unwrap();
//! assert!(payload.starts_with(b"{"));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_info {
    ($($arg:tt)*) => { log::info!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

pub mod constants;
pub mod encoder;
pub mod errors;
pub mod link;
pub mod outcome;
pub mod reading;
pub mod time;
pub mod traits;
pub mod uplink;

// Public API
pub use encoder::ReadingEncoder;
pub use errors::{ChannelError, DecodeError, EncodeError, LinkError, SessionError};
pub use link::{Credentials, LinkConfig, LinkDriver, LinkInfo, LinkManager, LinkState, LinkStatus, MacAddress};
pub use outcome::{DeliveryOutcome, DeliveryStats};
pub use reading::Reading;
pub use time::{Delay, FixedTime, RecordingDelay, TimeSource, Timestamp};
pub use traits::Transport;
pub use uplink::Uplink;

#[cfg(feature = "std")]
pub use time::{StdDelay, SystemTime};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
