//! Collector Transports for the MotorWatch Uplink
//!
//! ## Overview
//!
//! Two interchangeable ways of getting a reading to the cloud. Both implement
//! [`motorwatch_core::Transport`], so the sampling loop does not care which
//! one it was built with.
//!
//! ### Request/response ([`http::RequestTransport`])
//!
//! **When to use:**
//! - The collector is an inference endpoint that scores each reading
//! - The device wants the prediction back (failure probability)
//! - Firewall-friendly HTTPS is the only way out
//!
//! **Characteristics:**
//! - One fresh connection per reading, nothing survives between calls
//! - Bounded wait (15 s) for the answer
//! - Four-way outcome: success, server error, undecodable body, transport fault
//!
//! ### Broker session ([`mqtt::SessionTransport`])
//!
//! **When to use:**
//! - Several consumers want the raw stream
//! - Scoring happens server-side, the device needs no answer
//! - The network is reliable enough to hold a session open
//!
//! **Characteristics:**
//! - Long-lived session keyed by a per-device identifier
//! - Lazy (re)establishment with a fixed 5 s pause between attempts
//! - Keep-alive serviced on its own cadence via `service()`
//! - Fire-and-forget publish; success carries the neutral prediction `0.0`
//!
//! ## Channel Seams
//!
//! Transports hold the state machine; the byte-moving lives behind a channel
//! trait so tests can inject faults:
//!
//! ```text
//! ┌──────────────────┐      ┌──────────────────┐
//! │ RequestTransport │─────▶│   HttpChannel    │── UreqChannel   (feature "http")
//! └──────────────────┘      └──────────────────┘
//! ┌──────────────────┐      ┌──────────────────┐
//! │ SessionTransport │─────▶│  BrokerChannel   │── RumqttChannel (feature "mqtt")
//! └──────────────────┘      └──────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use motorwatch_connectors::http::{HttpConfig, RequestTransport, UreqChannel};
//! use motorwatch_core::{LinkConfig, LinkManager, Reading, StdDelay, Uplink};
//!
//! let transport = RequestTransport::new(HttpConfig::from_build_env(), UreqChannel::new())?;
//! let link = LinkManager::new(radio, StdDelay, LinkConfig::default());
//! let mut uplink = Uplink::new(link, transport);
//!
//! uplink.start()?;
//! let outcome = uplink.deliver(Reading::new(65.5, 0.02, 1500, 1_000_000));
//! ```

pub mod http;
pub mod mqtt;

// Re-export common types
pub use http::{HttpChannel, HttpConfig, HttpResponse, RequestTransport};
pub use mqtt::{BrokerChannel, MqttConfig, SessionState, SessionTransport};

#[cfg(feature = "http")]
pub use http::UreqChannel;

#[cfg(feature = "mqtt")]
pub use mqtt::RumqttChannel;

use thiserror::Error;

/// Errors raised while building a transport
#[derive(Debug, Error, PartialEq)]
pub enum ConnectorError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
