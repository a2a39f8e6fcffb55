//! Error Types for the Uplink
//!
//! ## Design Philosophy
//!
//! Errors here never reach the caller of a delivery call directly. Every
//! transport folds them into a [`DeliveryOutcome`](crate::DeliveryOutcome)
//! variant, so a sampling loop only ever matches on outcomes. The error types
//! exist for the seams underneath:
//!
//! - **Link layer**: acquisition ran out of poll attempts ([`LinkError`])
//! - **Encoding**: a reading could not be put on the wire ([`EncodeError`])
//! - **Decoding**: the collector answered with something unusable ([`DecodeError`])
//! - **Channels**: the HTTP or broker channel failed mid-call ([`ChannelError`])
//! - **Sessions**: a bounded session loop gave up ([`SessionError`])
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use motorwatch_core::{DeliveryOutcome, LinkError};
//!
//! fn on_start(result: Result<(), LinkError>) -> DeliveryOutcome {
//!     match result {
//!         Ok(()) => DeliveryOutcome::Success(0.0),
//!         // The caller re-runs acquisition on its next cycle
//!         Err(LinkError::Unavailable { .. }) => DeliveryOutcome::LinkUnavailable,
//!     }
//! }
//! ```

use alloc::string::String;
use thiserror_no_std::Error;

/// Link acquisition failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// The link never reported connected within the poll budget
    #[error("Link unavailable after {attempts} poll attempts")]
    Unavailable {
        /// Number of status polls that were made
        attempts: u32,
    },
}

/// Reading encoding failures
///
/// These are contract violations by the caller (a reading that cannot be
/// represented on the wire), not runtime conditions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
    /// A float field was NaN or infinite
    #[error("Field {field} is not a finite number")]
    NonFinite {
        /// Wire name of the offending field
        field: &'static str,
    },

    /// The serializer rejected the document
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Response decoding failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Body is not a structured document of the expected shape
    #[error("Malformed response body: {0}")]
    Malformed(String),

    /// Body parsed, but the prediction field is absent or null
    #[error("Response is missing field {0}")]
    MissingField(&'static str),
}

/// Failures of the underlying request or broker channel
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChannelError {
    /// No answer within the configured timeout
    #[error("Timed out")]
    Timeout,

    /// Socket, DNS or TLS level failure
    #[error("I/O error: {0}")]
    Io(String),

    /// The peer answered but broke the protocol (refused CONNACK, bad frame)
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Operation needs an open session and there is none
    #[error("Not connected")]
    NotConnected,
}

/// Broker session establishment failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// A bounded session loop used all of its attempts
    #[error("Session not established after {attempts} attempts")]
    AttemptsExhausted {
        /// Number of connect attempts that were made
        attempts: u32,
    },

    /// Prefix plus hardware address does not fit the identifier buffer
    #[error("Session identifier exceeds {capacity} bytes")]
    IdentifierTooLong {
        /// Identifier buffer capacity
        capacity: usize,
    },
}
