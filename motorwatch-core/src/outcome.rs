//! Delivery outcomes and per-transport statistics
//!
//! Every send or publish returns a [`DeliveryOutcome`]. Nothing is thrown
//! and nothing is swallowed: each failure path has its own variant so the
//! sampling loop can decide whether to retry on the next cycle, drop the
//! reading, or raise an alert.

use alloc::string::String;
use core::fmt;

/// Typed result of one delivery attempt
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryOutcome {
    /// Collector accepted the reading
    ///
    /// Carries the predicted failure probability for request/response
    /// delivery. Fire-and-forget delivery has no prediction and reports the
    /// neutral `0.0`.
    Success(f32),

    /// Collector answered with a non-success status code
    ServerError(u16),

    /// Network or session fault before a usable answer arrived
    TransportError(String),

    /// Link was not connected; no I/O was attempted
    LinkUnavailable,

    /// Round trip succeeded but the body could not be decoded
    DecodeError,
}

impl DeliveryOutcome {
    /// True only for [`DeliveryOutcome::Success`]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Predicted value of a successful delivery
    pub fn prediction(&self) -> Option<f32> {
        match self {
            Self::Success(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(value) => write!(f, "delivered (prediction {:.4})", value),
            Self::ServerError(code) => write!(f, "server error {}", code),
            Self::TransportError(reason) => write!(f, "transport error: {}", reason),
            Self::LinkUnavailable => write!(f, "link unavailable"),
            Self::DecodeError => write!(f, "undecodable response"),
        }
    }
}

/// Delivery statistics common to all transports
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DeliveryStats {
    /// Total readings delivered successfully
    pub messages_sent: u64,
    /// Total delivery attempts that did not succeed
    pub messages_failed: u64,
    /// Total payload bytes handed to the channel
    pub bytes_sent: u64,
    /// Number of session (re)establishments
    pub reconnections: u32,
    /// Last failure, rendered for humans
    pub last_error: Option<String>,
}

impl DeliveryStats {
    /// Fold one outcome into the counters
    pub fn record(&mut self, outcome: &DeliveryOutcome, payload_len: usize) {
        match outcome {
            DeliveryOutcome::Success(_) => {
                self.messages_sent += 1;
                self.bytes_sent += payload_len as u64;
            }
            other => {
                use alloc::string::ToString;

                self.messages_failed += 1;
                self.last_error = Some(other.to_string());
            }
        }
    }
}
