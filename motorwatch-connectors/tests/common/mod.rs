//! Common test utilities for transport integration tests
//!
//! This module provides:
//! - Link, request and broker stubs with call counters
//! - A deterministic motor reading generator (healthy and failing motors)

#![allow(dead_code)]

use std::cell::Cell;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use motorwatch_connectors::{BrokerChannel, HttpChannel, HttpResponse};
use motorwatch_core::{ChannelError, Credentials, LinkDriver, LinkStatus, MacAddress, Reading, Timestamp};

pub const DEVICE_MAC: MacAddress = MacAddress::new([0x24, 0x6F, 0x28, 0x00, 0x00, 0x01]);

/// Link capability fixed up or down
pub struct StubLink {
    pub up: bool,
}

impl StubLink {
    pub fn up() -> Self {
        Self { up: true }
    }

    pub fn down() -> Self {
        Self { up: false }
    }
}

impl LinkStatus for StubLink {
    fn is_link_up(&self) -> bool {
        self.up
    }

    fn hardware_address(&self) -> MacAddress {
        DEVICE_MAC
    }
}

/// Radio driver that comes up after a scripted number of polls
pub struct ScriptedRadio {
    polls_until_up: Option<u32>,
    polls: Cell<u32>,
    pub begins: u32,
    pub up: Cell<bool>,
}

impl ScriptedRadio {
    /// Connected once `polls` status checks have been made
    pub fn up_after(polls: u32) -> Self {
        Self {
            polls_until_up: Some(polls),
            polls: Cell::new(0),
            begins: 0,
            up: Cell::new(false),
        }
    }

    pub fn never_up() -> Self {
        Self {
            polls_until_up: None,
            polls: Cell::new(0),
            begins: 0,
            up: Cell::new(false),
        }
    }

    pub fn polls(&self) -> u32 {
        self.polls.get()
    }
}

impl LinkDriver for ScriptedRadio {
    fn begin(&mut self, _credentials: &Credentials) {
        self.begins += 1;
        self.polls.set(0);
    }

    fn is_connected(&self) -> bool {
        let polls = self.polls.get() + 1;
        self.polls.set(polls);
        if let Some(target) = self.polls_until_up {
            if polls >= target {
                self.up.set(true);
            }
        }
        self.up.get()
    }

    fn local_address(&self) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(192, 168, 1, 50))
    }

    fn signal_strength(&self) -> i8 {
        -61
    }

    fn hardware_address(&self) -> MacAddress {
        DEVICE_MAC
    }
}

/// Request channel returning a canned result, counting calls
pub struct StubHttpChannel {
    result: Result<HttpResponse, ChannelError>,
    pub calls: u32,
    pub last_body: Option<Vec<u8>>,
}

impl StubHttpChannel {
    pub fn answering(status: u16, body: &str) -> Self {
        Self {
            result: Ok(HttpResponse::new(status, body)),
            calls: 0,
            last_body: None,
        }
    }

    pub fn failing(err: ChannelError) -> Self {
        Self {
            result: Err(err),
            calls: 0,
            last_body: None,
        }
    }
}

impl HttpChannel for StubHttpChannel {
    fn post(
        &mut self,
        _url: &str,
        _content_type: &str,
        body: &[u8],
        _timeout: Duration,
    ) -> Result<HttpResponse, ChannelError> {
        self.calls += 1;
        self.last_body = Some(body.to_vec());
        self.result.clone()
    }
}

/// Broker refusing `refusals` connects before accepting
#[derive(Default)]
pub struct StubBroker {
    pub refusals: u32,
    pub connected: bool,
    pub connect_calls: u32,
    pub publish_calls: u32,
    pub last_client_id: Option<String>,
    pub last_payload: Option<Vec<u8>>,
}

impl StubBroker {
    pub fn refusing(refusals: u32) -> Self {
        Self {
            refusals,
            ..Self::default()
        }
    }

    pub fn io_calls(&self) -> u32 {
        self.connect_calls + self.publish_calls
    }
}

impl BrokerChannel for StubBroker {
    fn connect(&mut self, client_id: &str) -> Result<(), ChannelError> {
        self.connect_calls += 1;
        self.last_client_id = Some(client_id.to_string());
        if self.refusals > 0 {
            self.refusals -= 1;
            return Err(ChannelError::Protocol("connection refused".into()));
        }
        self.connected = true;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn publish(&mut self, _topic: &str, payload: &[u8]) -> Result<(), ChannelError> {
        self.publish_calls += 1;
        self.last_payload = Some(payload.to_vec());
        Ok(())
    }

    fn service_tick(&mut self) {}
}

/// Deterministic motor readings
pub struct ReadingGenerator {
    seed: u32,
    timestamp: Timestamp,
}

impl ReadingGenerator {
    pub fn new(start: Timestamp) -> Self {
        Self {
            seed: 42,
            timestamp: start,
        }
    }

    /// Motor running within its normal envelope
    pub fn healthy(&mut self) -> Reading {
        let temperature = 60.0 + self.uniform(-5.0, 5.0);
        let vibration = 0.02 + self.uniform(0.0, 0.01);
        let rpm = 1500 + self.uniform(-50.0, 50.0) as i32;
        self.next(temperature, vibration, rpm)
    }

    /// Overheating, shaking motor
    pub fn failing(&mut self) -> Reading {
        let temperature = 85.0 + self.uniform(0.0, 10.0);
        let vibration = 0.3 + self.uniform(0.0, 0.2);
        let rpm = 1200 + self.uniform(-100.0, 100.0) as i32;
        self.next(temperature, vibration, rpm)
    }

    fn next(&mut self, temperature: f32, vibration: f32, rpm: i32) -> Reading {
        let reading = Reading::new(temperature, vibration, rpm, self.timestamp);
        self.timestamp += 1;
        reading
    }

    fn uniform(&mut self, low: f32, high: f32) -> f32 {
        self.seed = self.seed.wrapping_mul(1664525).wrapping_add(1013904223);
        let unit = (self.seed as f32) / (u32::MAX as f32);
        low + unit * (high - low)
    }
}
