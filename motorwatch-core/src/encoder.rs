//! Wire encoding for readings and collector responses
//!
//! Readings travel as a keyed JSON document so that collectors can add or
//! reorder fields without breaking older firmware:
//!
//! ```json
//! {"temperature":65.5,"vibration":0.02,"rpm":1500,"timestamp":1000000}
//! ```
//!
//! The request/response collector answers with a single keyed field:
//!
//! ```json
//! {"failure_probability":0.12}
//! ```
//!
//! Unknown response fields are ignored. A missing or non-numeric
//! `failure_probability` is a decode failure; no partial value is ever
//! returned.

use alloc::string::ToString;
use alloc::vec::Vec;
use serde::Deserialize;

use crate::constants::network::PREDICTION_FIELD;
use crate::errors::{DecodeError, EncodeError};
use crate::reading::Reading;

/// Response body of the inference endpoint
#[derive(Debug, Deserialize)]
struct PredictionResponse {
    failure_probability: Option<f32>,
}

/// Stateless reading encoder / response decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadingEncoder;

impl ReadingEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode a reading into its wire document
    ///
    /// Succeeds for every reading with finite float fields. Non-finite
    /// values have no JSON representation and are rejected rather than
    /// silently sent as `null`.
    pub fn encode(&self, reading: &Reading) -> Result<Vec<u8>, EncodeError> {
        if let Some(field) = reading.non_finite_field() {
            return Err(EncodeError::NonFinite { field });
        }

        serde_json::to_vec(reading).map_err(|e| EncodeError::Serialization(e.to_string()))
    }

    /// Decode the predicted failure probability from a response body
    pub fn decode(&self, body: &[u8]) -> Result<f32, DecodeError> {
        let response: PredictionResponse = serde_json::from_slice(body)
            .map_err(|e| DecodeError::Malformed(e.to_string()))?;

        response
            .failure_probability
            .ok_or(DecodeError::MissingField(PREDICTION_FIELD))
    }
}
