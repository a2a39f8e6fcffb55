//! Request/Response Transport - Scoring Readings at an Inference Endpoint
//!
//! ## Overview
//!
//! Each reading becomes one HTTPS POST to the inference endpoint. The
//! endpoint answers with the predicted failure probability:
//!
//! ```text
//! POST /predict  {"temperature":65.5,"vibration":0.02,"rpm":1500,"timestamp":1000000}
//! 200 OK         {"failure_probability":0.12}
//! ```
//!
//! ## Outcome Classification
//!
//! | Channel result               | Outcome                      |
//! |------------------------------|------------------------------|
//! | status 200, body decodes     | `Success(probability)`       |
//! | status 200, body malformed   | `DecodeError`                |
//! | any other status             | `ServerError(status)`        |
//! | no response / socket fault   | `TransportError(diagnostic)` |
//!
//! The transport never retries. A failed reading is dropped and the caller
//! tries again with the next sample.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use motorwatch_connectors::http::{HttpConfig, RequestTransport, UreqChannel};
//!
//! let config = HttpConfig::new("https://api.example.com/predict")
//!     .timeout_secs(15);
//! let mut transport = RequestTransport::new(config, UreqChannel::new())?;
//! let outcome = transport.send(&link, reading);
//! ```

use std::time::Duration;

use log::{info, warn};
use motorwatch_core::constants::network::PREDICT_URL;
use motorwatch_core::constants::time::REQUEST_TIMEOUT_MS;
use motorwatch_core::{
    ChannelError, DeliveryOutcome, DeliveryStats, LinkStatus, Reading, ReadingEncoder, Transport,
};

use crate::ConnectorError;

/// Status code the endpoint uses for a scored reading
const STATUS_OK: u16 = 200;

/// Answer from the endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// One-shot request channel
///
/// Each call opens, uses and closes its own connection. A response with any
/// status (including 4xx/5xx) is `Ok`; `Err` means no response arrived.
pub trait HttpChannel {
    fn post(
        &mut self,
        url: &str,
        content_type: &str,
        body: &[u8],
        timeout: Duration,
    ) -> Result<HttpResponse, ChannelError>;
}

impl<C: HttpChannel + ?Sized> HttpChannel for &mut C {
    fn post(
        &mut self,
        url: &str,
        content_type: &str,
        body: &[u8],
        timeout: Duration,
    ) -> Result<HttpResponse, ChannelError> {
        (**self).post(url, content_type, body, timeout)
    }
}

/// Request transport configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Full URL of the scoring endpoint
    pub url: String,
    /// Upper bound on one round trip
    pub timeout: Duration,
    /// Content type of the request body
    pub content_type: String,
}

impl HttpConfig {
    /// Create new configuration with endpoint URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_millis(u64::from(REQUEST_TIMEOUT_MS)),
            content_type: "application/json".into(),
        }
    }

    /// Endpoint compiled into the image
    pub fn from_build_env() -> Self {
        Self::new(PREDICT_URL)
    }

    /// Set request timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Set request timeout in milliseconds
    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.timeout = Duration::from_millis(ms);
        self
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

/// Variant A: one request per reading, prediction in the response
pub struct RequestTransport<C: HttpChannel> {
    config: HttpConfig,
    channel: C,
    encoder: ReadingEncoder,
    stats: DeliveryStats,
}

impl<C: HttpChannel> RequestTransport<C> {
    /// Create new request transport
    pub fn new(config: HttpConfig, channel: C) -> Result<Self, ConnectorError> {
        if !config.url.starts_with("http://") && !config.url.starts_with("https://") {
            return Err(ConnectorError::ConfigError(
                "Endpoint URL must start with http:// or https://".into(),
            ));
        }

        Ok(Self {
            config,
            channel,
            encoder: ReadingEncoder::new(),
            stats: DeliveryStats::default(),
        })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    fn attempt(&mut self, link: &dyn LinkStatus, reading: &Reading) -> (DeliveryOutcome, usize) {
        if !link.is_link_up() {
            warn!("Link not connected, reading not sent");
            return (DeliveryOutcome::LinkUnavailable, 0);
        }

        let payload = match self.encoder.encode(reading) {
            Ok(payload) => payload,
            Err(e) => {
                log::error!("Reading cannot be encoded: {}", e);
                return (DeliveryOutcome::TransportError(format!("encode: {}", e)), 0);
            }
        };

        info!("Sending reading to {}", self.config.url);
        let result = self.channel.post(
            &self.config.url,
            &self.config.content_type,
            &payload,
            self.config.timeout,
        );

        (self.classify(result), payload.len())
    }

    fn classify(&self, result: Result<HttpResponse, ChannelError>) -> DeliveryOutcome {
        match result {
            Ok(response) if response.status == STATUS_OK => {
                match self.encoder.decode(&response.body) {
                    Ok(probability) => DeliveryOutcome::Success(probability),
                    Err(e) => {
                        warn!("Failed to parse response: {}", e);
                        DeliveryOutcome::DecodeError
                    }
                }
            }
            Ok(response) if response.status > 0 => {
                warn!(
                    "HTTP error {}: {}",
                    response.status,
                    String::from_utf8_lossy(&response.body)
                );
                DeliveryOutcome::ServerError(response.status)
            }
            Ok(_) => DeliveryOutcome::TransportError("response without status".into()),
            Err(e) => {
                warn!("Connection error: {}", e);
                DeliveryOutcome::TransportError(e.to_string())
            }
        }
    }
}

impl<C: HttpChannel> Transport for RequestTransport<C> {
    fn name(&self) -> &'static str {
        "http"
    }

    fn send(&mut self, link: &dyn LinkStatus, reading: Reading) -> DeliveryOutcome {
        let (outcome, payload_len) = self.attempt(link, &reading);
        self.stats.record(&outcome, payload_len);
        outcome
    }

    fn stats(&self) -> DeliveryStats {
        self.stats.clone()
    }
}

#[cfg(feature = "http")]
pub use self::ureq_impl::UreqChannel;

#[cfg(feature = "http")]
mod ureq_impl {
    use super::*;

    /// Production channel backed by a blocking ureq agent
    ///
    /// Builds a fresh agent with pooling disabled for every request, so no
    /// connection state survives between readings.
    #[derive(Debug, Clone)]
    pub struct UreqChannel {
        user_agent: String,
    }

    impl UreqChannel {
        pub fn new() -> Self {
            Self {
                user_agent: format!("MotorWatch/{}", env!("CARGO_PKG_VERSION")),
            }
        }
    }

    impl Default for UreqChannel {
        fn default() -> Self {
            Self::new()
        }
    }

    impl HttpChannel for UreqChannel {
        fn post(
            &mut self,
            url: &str,
            content_type: &str,
            body: &[u8],
            timeout: Duration,
        ) -> Result<HttpResponse, ChannelError> {
            let agent = ureq::AgentBuilder::new()
                .timeout(timeout)
                .user_agent(&self.user_agent)
                .max_idle_connections(0)
                .build();

            let result = agent
                .post(url)
                .set("Content-Type", content_type)
                .set("Accept", "application/json")
                .send_bytes(body);

            match result {
                Ok(resp) => read_response(resp),
                // ureq reports 4xx/5xx as errors; for us they are answers
                Err(ureq::Error::Status(_, resp)) => read_response(resp),
                Err(ureq::Error::Transport(e)) => Err(ChannelError::Io(e.to_string())),
            }
        }
    }

    fn read_response(resp: ureq::Response) -> Result<HttpResponse, ChannelError> {
        let status = resp.status();
        let body = resp
            .into_string()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => ChannelError::Timeout,
                _ => ChannelError::Io(e.to_string()),
            })?;

        Ok(HttpResponse::new(status, body))
    }

}
