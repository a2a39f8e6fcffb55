//! Constants for MotorWatch Core
//!
//! Centralised timing and network constants for the uplink. Everything the
//! device needs to find its collector is compiled in; a few values can be
//! overridden from the build environment (see [`network`]).
//!
//! ## Organization
//!
//! - **Time**: Poll intervals, attempt bounds, timeouts and retry delays
//! - **Network**: Endpoint, broker, topic and credential defaults
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Use descriptive names that include units
//! 3. Keep build-time overrides in [`network`], never in the time budget

/// Poll intervals, attempt bounds and timeouts for the link and transports.
pub mod time;

/// Endpoint, broker and credential defaults.
pub mod network;

pub use time::{
    LINK_POLL_INTERVAL_MS, LINK_MAX_POLL_ATTEMPTS, REQUEST_TIMEOUT_MS,
    SESSION_RETRY_DELAY_MS, SESSION_KEEP_ALIVE_S,
};

pub use network::{
    PREDICT_URL, MQTT_BROKER_HOST, MQTT_BROKER_PORT, MQTT_TOPIC,
    SESSION_ID_PREFIX, WIFI_SSID, WIFI_PASSWORD,
};
