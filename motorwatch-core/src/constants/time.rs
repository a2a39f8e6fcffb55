//! Time-Related Constants
//!
//! Intervals, attempt bounds and timeouts for link acquisition and the two
//! delivery transports.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u32 = 1000;

// ===== LINK ACQUISITION =====

/// Interval between link status polls (milliseconds).
pub const LINK_POLL_INTERVAL_MS: u32 = 500;

/// Number of status polls before link acquisition gives up.
///
/// 60 polls at 500 ms puts a ~30 s ceiling on a single acquisition.
pub const LINK_MAX_POLL_ATTEMPTS: u32 = 60;

// ===== REQUEST/RESPONSE TRANSPORT =====

/// Upper bound on one request round trip (milliseconds).
///
/// Inference endpoints on serverless platforms can cold-start; 15 s covers
/// a cold start without letting a dead endpoint stall a sampling cycle for
/// long.
pub const REQUEST_TIMEOUT_MS: u32 = 15 * MS_PER_SECOND;

// ===== SESSION TRANSPORT =====

/// Pause between broker session attempts (milliseconds).
pub const SESSION_RETRY_DELAY_MS: u32 = 5 * MS_PER_SECOND;

/// Broker keep-alive interval (seconds).
pub const SESSION_KEEP_ALIVE_S: u16 = 60;

/// How long the production broker channel waits for a CONNACK (milliseconds).
pub const SESSION_CONNECT_TIMEOUT_MS: u32 = 5 * MS_PER_SECOND;
