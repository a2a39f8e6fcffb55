//! Broker Session Transport - Publishing Readings over a Long-Lived Session
//!
//! ## Overview
//!
//! Readings are published to one topic (`motor/health/data` by default) on a
//! message broker. The session is opened lazily: the first publish, or the
//! first `service()` call with the link up, establishes it.
//!
//! ## Session Lifecycle
//!
//! ```text
//!            ┌───────────────┐  connect ok   ┌───────────┐
//!   ───────▶ │ Disconnected  │ ────────────▶ │ Connected │
//!            └───────────────┘               └───────────┘
//!               ▲    │ connect failed             │
//!               │    └── pause 5 s, retry         │ publish failed /
//!               └─────────────────────────────────┘ channel dropped
//! ```
//!
//! The client identifier is the configured prefix followed by the device's
//! hardware address with separators stripped, e.g. `motorwatch-246F28000001`.
//!
//! ## Retry Bound
//!
//! With `max_session_attempts = None` the establishment loop retries for as
//! long as it takes; the sampling loop is blocked meanwhile. Setting a bound
//! makes an exhausted loop surface as a `TransportError` outcome instead.

use std::time::Duration;

use log::{debug, info, warn};
use motorwatch_core::constants::network::{
    MQTT_BROKER_HOST, MQTT_BROKER_PORT, MQTT_TOPIC, SESSION_ID_CAPACITY, SESSION_ID_PREFIX,
};
use motorwatch_core::constants::time::{SESSION_KEEP_ALIVE_S, SESSION_RETRY_DELAY_MS};
use motorwatch_core::{
    ChannelError, Delay, DeliveryOutcome, DeliveryStats, LinkStatus, MacAddress, Reading,
    ReadingEncoder, SessionError, Transport,
};

/// Fixed-capacity client identifier
pub type SessionId = heapless::String<SESSION_ID_CAPACITY>;

/// Session-oriented broker channel
pub trait BrokerChannel {
    /// Open a session under the given client identifier
    fn connect(&mut self, client_id: &str) -> Result<(), ChannelError>;

    /// Whether the last opened session is still alive
    fn is_connected(&self) -> bool;

    /// Publish one payload on an open session
    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), ChannelError>;

    /// Process keep-alive and inbound traffic
    fn service_tick(&mut self);
}

/// Broker transport configuration
#[derive(Debug, Clone)]
pub struct MqttConfig {
    pub host: String,
    pub port: u16,
    pub topic: String,
    pub client_prefix: String,
    pub keep_alive: Duration,
    /// Pause between failed session attempts
    pub retry_delay_ms: u32,
    /// `None` retries until the broker answers
    pub max_session_attempts: Option<u32>,
}

impl MqttConfig {
    /// Create new configuration for a broker host
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: MQTT_BROKER_PORT,
            topic: MQTT_TOPIC.into(),
            client_prefix: SESSION_ID_PREFIX.into(),
            keep_alive: Duration::from_secs(u64::from(SESSION_KEEP_ALIVE_S)),
            retry_delay_ms: SESSION_RETRY_DELAY_MS,
            max_session_attempts: None,
        }
    }

    /// Broker compiled into the image
    pub fn from_build_env() -> Self {
        Self::new(MQTT_BROKER_HOST)
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn client_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.client_prefix = prefix.into();
        self
    }

    pub fn keep_alive_secs(mut self, secs: u64) -> Self {
        self.keep_alive = Duration::from_secs(secs);
        self
    }

    pub fn retry_delay_ms(mut self, ms: u32) -> Self {
        self.retry_delay_ms = ms;
        self
    }

    /// Give up after `attempts` failed connects instead of retrying forever
    pub fn max_session_attempts(mut self, attempts: u32) -> Self {
        self.max_session_attempts = Some(attempts);
        self
    }
}

impl Default for MqttConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

/// Broker session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connected,
}

/// Build the client identifier for a device
pub fn session_identifier(prefix: &str, mac: MacAddress) -> Result<SessionId, SessionError> {
    let overflow = SessionError::IdentifierTooLong {
        capacity: SESSION_ID_CAPACITY,
    };

    let mut id = SessionId::new();
    id.push_str(prefix).map_err(|_| overflow)?;
    mac.write_compact(&mut id).map_err(|_| overflow)?;
    Ok(id)
}

/// Variant B: publish over a lazily (re)established broker session
pub struct SessionTransport<B: BrokerChannel, D: Delay> {
    config: MqttConfig,
    channel: B,
    delay: D,
    encoder: ReadingEncoder,
    state: SessionState,
    session_id: Option<SessionId>,
    stats: DeliveryStats,
}

impl<B: BrokerChannel, D: Delay> SessionTransport<B, D> {
    pub fn new(config: MqttConfig, channel: B, delay: D) -> Self {
        Self {
            config,
            channel,
            delay,
            encoder: ReadingEncoder::new(),
            state: SessionState::Disconnected,
            session_id: None,
            stats: DeliveryStats::default(),
        }
    }

    /// Open the session unless it is already up
    ///
    /// Blocks until the broker accepts, pausing `retry_delay_ms` after each
    /// refusal. Only returns an error when a retry bound is configured or
    /// the identifier does not fit.
    pub fn ensure_session(&mut self, link: &dyn LinkStatus) -> Result<(), SessionError> {
        if self.is_session_up() {
            return Ok(());
        }
        self.state = SessionState::Disconnected;

        let id = session_identifier(&self.config.client_prefix, link.hardware_address())?;
        let mut attempts: u32 = 0;

        loop {
            attempts = attempts.saturating_add(1);
            info!(
                "Connecting to broker {}:{} as {} (attempt {})",
                self.config.host, self.config.port, id, attempts
            );

            match self.channel.connect(&id) {
                Ok(()) => {
                    info!("Broker session established");
                    self.state = SessionState::Connected;
                    self.session_id = Some(id);
                    self.stats.reconnections = self.stats.reconnections.saturating_add(1);
                    return Ok(());
                }
                Err(e) => {
                    warn!("Broker connect failed: {}", e);
                    if let Some(max) = self.config.max_session_attempts {
                        if attempts >= max {
                            return Err(SessionError::AttemptsExhausted { attempts });
                        }
                    }
                    self.delay.delay_ms(self.config.retry_delay_ms);
                }
            }
        }
    }

    pub fn session_state(&self) -> SessionState {
        self.state
    }

    /// Identifier of the last established session
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn config(&self) -> &MqttConfig {
        &self.config
    }

    pub fn channel(&self) -> &B {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut B {
        &mut self.channel
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    fn is_session_up(&self) -> bool {
        self.state == SessionState::Connected && self.channel.is_connected()
    }

    /// Pump the channel so a session the broker closed is noticed now
    fn refresh_session(&mut self) {
        if self.state != SessionState::Connected {
            return;
        }

        self.channel.service_tick();
        if !self.channel.is_connected() {
            warn!("Broker session dropped");
            self.state = SessionState::Disconnected;
        }
    }

    fn attempt(&mut self, link: &dyn LinkStatus, reading: &Reading) -> (DeliveryOutcome, usize) {
        if !link.is_link_up() {
            warn!("Link not connected, reading not published");
            return (DeliveryOutcome::LinkUnavailable, 0);
        }

        self.refresh_session();
        if let Err(e) = self.ensure_session(link) {
            return (DeliveryOutcome::TransportError(e.to_string()), 0);
        }

        let payload = match self.encoder.encode(reading) {
            Ok(payload) => payload,
            Err(e) => {
                log::error!("Reading cannot be encoded: {}", e);
                return (DeliveryOutcome::TransportError(format!("encode: {}", e)), 0);
            }
        };

        match self.channel.publish(&self.config.topic, &payload) {
            Ok(()) => {
                info!("Published {} bytes to {}", payload.len(), self.config.topic);
                (DeliveryOutcome::Success(0.0), payload.len())
            }
            Err(e) => {
                warn!("Failed to publish reading: {}", e);
                self.state = SessionState::Disconnected;
                (DeliveryOutcome::TransportError(e.to_string()), payload.len())
            }
        }
    }
}

impl<B: BrokerChannel, D: Delay> Transport for SessionTransport<B, D> {
    fn name(&self) -> &'static str {
        "mqtt"
    }

    fn send(&mut self, link: &dyn LinkStatus, reading: Reading) -> DeliveryOutcome {
        let (outcome, payload_len) = self.attempt(link, &reading);
        self.stats.record(&outcome, payload_len);
        outcome
    }

    fn service(&mut self, link: &dyn LinkStatus) {
        if !link.is_link_up() {
            debug!("Link down, skipping session service");
            return;
        }

        self.refresh_session();
        if self.is_session_up() {
            return;
        }

        if let Err(e) = self.ensure_session(link) {
            warn!("Session not restored: {}", e);
        }
    }

    fn stats(&self) -> DeliveryStats {
        self.stats.clone()
    }
}

#[cfg(feature = "mqtt")]
pub use self::rumqtt_impl::RumqttChannel;

#[cfg(feature = "mqtt")]
mod rumqtt_impl {
    use super::*;
    use rumqttc::{
        Client, ConnectReturnCode, Connection, ConnectionError, Event, MqttOptions, Outgoing,
        Packet, QoS,
    };
    use std::time::Instant;

    const REQUEST_CAPACITY: usize = 10;
    const SERVICE_POLL: Duration = Duration::from_millis(10);
    const MAX_EVENTS_PER_TICK: usize = 32;

    /// Production channel backed by the rumqttc blocking client
    pub struct RumqttChannel {
        host: String,
        port: u16,
        keep_alive: Duration,
        io_timeout: Duration,
        session: Option<(Client, Connection)>,
        connected: bool,
    }

    impl RumqttChannel {
        pub fn new(host: impl Into<String>, port: u16) -> Self {
            Self {
                host: host.into(),
                port,
                keep_alive: Duration::from_secs(u64::from(SESSION_KEEP_ALIVE_S)),
                io_timeout: Duration::from_millis(u64::from(
                    motorwatch_core::constants::time::SESSION_CONNECT_TIMEOUT_MS,
                )),
                session: None,
                connected: false,
            }
        }

        pub fn from_config(config: &MqttConfig) -> Self {
            let mut channel = Self::new(config.host.clone(), config.port);
            channel.keep_alive = config.keep_alive;
            channel
        }

        fn drop_session(&mut self) {
            if let Some((client, _)) = self.session.take() {
                let _ = client.try_disconnect();
            }
            self.connected = false;
        }
    }

    impl BrokerChannel for RumqttChannel {
        fn connect(&mut self, client_id: &str) -> Result<(), ChannelError> {
            self.drop_session();

            let mut options = MqttOptions::new(client_id, self.host.clone(), self.port);
            options.set_keep_alive(self.keep_alive);
            options.set_clean_session(true);

            let (client, mut connection) = Client::new(options, REQUEST_CAPACITY);
            let deadline = Instant::now() + self.io_timeout;

            loop {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    return Err(ChannelError::Timeout);
                }

                match connection.recv_timeout(remaining) {
                    Ok(Ok(Event::Incoming(Packet::ConnAck(ack)))) => {
                        if ack.code != ConnectReturnCode::Success {
                            return Err(ChannelError::Protocol(format!(
                                "connection refused: {:?}",
                                ack.code
                            )));
                        }
                        self.session = Some((client, connection));
                        self.connected = true;
                        return Ok(());
                    }
                    Ok(Ok(_)) => continue,
                    // rumqttc reports a refused CONNACK as a connection error
                    Ok(Err(ConnectionError::ConnectionRefused(code))) => {
                        return Err(ChannelError::Protocol(format!(
                            "connection refused: {:?}",
                            code
                        )));
                    }
                    Ok(Err(e)) => return Err(ChannelError::Io(e.to_string())),
                    Err(_) => return Err(ChannelError::Timeout),
                }
            }
        }

        fn is_connected(&self) -> bool {
            self.connected
        }

        fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), ChannelError> {
            let (client, connection) = match self.session.as_mut() {
                Some(session) if self.connected => session,
                _ => return Err(ChannelError::NotConnected),
            };

            client
                .try_publish(topic, QoS::AtMostOnce, false, payload.to_vec())
                .map_err(|e| ChannelError::Io(e.to_string()))?;

            // Drive the event loop until the publish has been written out
            let deadline = Instant::now() + self.io_timeout;
            loop {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    return Err(ChannelError::Timeout);
                }

                match connection.recv_timeout(remaining) {
                    Ok(Ok(Event::Outgoing(Outgoing::Publish(_)))) => return Ok(()),
                    Ok(Ok(_)) => continue,
                    Ok(Err(e)) => {
                        self.connected = false;
                        return Err(ChannelError::Io(e.to_string()));
                    }
                    Err(_) => return Err(ChannelError::Timeout),
                }
            }
        }

        fn service_tick(&mut self) {
            let Some((_, connection)) = self.session.as_mut() else {
                return;
            };

            for _ in 0..MAX_EVENTS_PER_TICK {
                match connection.recv_timeout(SERVICE_POLL) {
                    Ok(Ok(event)) => debug!("Broker event: {:?}", event),
                    Ok(Err(e)) => {
                        warn!("Broker connection lost: {}", e);
                        self.connected = false;
                        return;
                    }
                    Err(_) => return,
                }
            }
        }
    }

}
