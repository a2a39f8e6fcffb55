//! Common test utilities for link and uplink integration tests

#![allow(dead_code)]

use core::cell::Cell;
use core::net::{IpAddr, Ipv4Addr};

use motorwatch_core::{
    Credentials, DeliveryOutcome, DeliveryStats, LinkDriver, LinkStatus, MacAddress, Reading,
    Transport,
};

/// Radio whose status follows a script of poll results
///
/// Each status poll consumes one entry; once the script runs out the last
/// entry repeats.
pub struct ScriptedRadio {
    script: Vec<bool>,
    cursor: Cell<usize>,
    pub begins: u32,
    pub last_ssid: Option<&'static str>,
}

impl ScriptedRadio {
    pub fn new(script: &[bool]) -> Self {
        Self {
            script: script.to_vec(),
            cursor: Cell::new(0),
            begins: 0,
            last_ssid: None,
        }
    }

    /// Link that drops after `polls` status checks
    pub fn drops_after(polls: usize) -> Self {
        let mut script = vec![true; polls];
        script.push(false);
        Self::new(&script)
    }

    pub fn polls(&self) -> usize {
        self.cursor.get()
    }
}

impl LinkDriver for ScriptedRadio {
    fn begin(&mut self, credentials: &Credentials) {
        self.begins += 1;
        self.last_ssid = Some(credentials.ssid);
    }

    fn is_connected(&self) -> bool {
        let i = self.cursor.get();
        self.cursor.set(i + 1);
        let last = self.script.len().saturating_sub(1);
        self.script.get(i.min(last)).copied().unwrap_or(false)
    }

    fn local_address(&self) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7))
    }

    fn signal_strength(&self) -> i8 {
        -72
    }

    fn hardware_address(&self) -> MacAddress {
        MacAddress::new([0xA4, 0xCF, 0x12, 0x0B, 0x3E, 0x90])
    }
}

/// Transport that records what it was asked to do
#[derive(Default)]
pub struct RecordingTransport {
    pub sent: Vec<Reading>,
    pub serviced: u32,
    stats: DeliveryStats,
}

impl Transport for RecordingTransport {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn send(&mut self, link: &dyn LinkStatus, reading: Reading) -> DeliveryOutcome {
        let outcome = if link.is_link_up() {
            self.sent.push(reading);
            DeliveryOutcome::Success(0.5)
        } else {
            DeliveryOutcome::LinkUnavailable
        };
        self.stats.record(&outcome, 0);
        outcome
    }

    fn service(&mut self, _link: &dyn LinkStatus) {
        self.serviced += 1;
    }

    fn stats(&self) -> DeliveryStats {
        self.stats.clone()
    }
}
