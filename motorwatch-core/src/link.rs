//! Wireless Link Acquisition
//!
//! ## Overview
//!
//! The device has one wireless link to local infrastructure. [`LinkManager`]
//! owns it: it starts a connection once, then polls the driver's status on
//! a fixed interval until the link reports connected or the poll budget runs
//! out. Nothing else mutates the link state; transports only read it through
//! the [`LinkStatus`] capability.
//!
//! ```text
//!  Disconnected ──acquire_link()──▶ Connecting ──status == up──▶ Connected
//!        ▲                              │
//!        └──────── 60 polls × 500 ms ───┘
//! ```
//!
//! Acquisition is bounded (~30 s with the default config). A caller that
//! wants to keep trying re-invokes [`LinkManager::acquire_link`] on its next
//! cycle; there is no retry loop around the poll loop.
//!
//! ## Example
//!
//! ```rust
//! use motorwatch_core::link::{Credentials, LinkConfig, LinkDriver, LinkManager, MacAddress};
//! use motorwatch_core::time::RecordingDelay;
//! use core::net::{IpAddr, Ipv4Addr};
//!
//! struct AlwaysUp;
//!
//! impl LinkDriver for AlwaysUp {
//!     fn begin(&mut self, _credentials: &Credentials) {}
//!     fn is_connected(&self) -> bool { true }
//!     fn local_address(&self) -> IpAddr { IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7)) }
//!     fn signal_strength(&self) -> i8 { -55 }
//!     fn hardware_address(&self) -> MacAddress { MacAddress::new([0x24, 0x6f, 0x28, 0, 0, 1]) }
//! }
//!
//! let mut link = LinkManager::new(AlwaysUp, RecordingDelay::new(), LinkConfig::default());
//! let info = link.acquire_link().unwrap();
//! assert_eq!(info.rssi_dbm, -55);
//! ```

use core::fmt;
use core::fmt::Write as _;
use core::net::IpAddr;

use crate::constants::network::{WIFI_PASSWORD, WIFI_SSID};
use crate::constants::time::{LINK_MAX_POLL_ATTEMPTS, LINK_POLL_INTERVAL_MS};
use crate::errors::LinkError;
use crate::time::Delay;

/// Network name and passphrase handed to the link driver
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub ssid: &'static str,
    pub password: &'static str,
}

impl Credentials {
    pub const fn new(ssid: &'static str, password: &'static str) -> Self {
        Self { ssid, password }
    }

    /// Credentials compiled into the image
    pub const fn from_build_env() -> Self {
        Self::new(WIFI_SSID, WIFI_PASSWORD)
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::from_build_env()
    }
}

// Never print the passphrase.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("ssid", &self.ssid)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Link-layer hardware address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    pub const fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Write the address with its colon separators stripped (`246F28000001`)
    pub fn write_compact<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        let mut text: heapless::String<17> = heapless::String::new();
        write!(text, "{}", self)?;
        for c in text.chars().filter(|&c| c != ':') {
            out.write_char(c)?;
        }
        Ok(())
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}", a, b, c, d, e, g)
    }
}

/// Primitives the device's link layer exposes
///
/// Implemented by the radio driver on hardware and by stubs in tests. The
/// manager never varies this call pattern: one `begin`, then status polls,
/// then metadata reads once connected.
pub trait LinkDriver {
    /// Start connecting with the given credentials (non-blocking)
    fn begin(&mut self, credentials: &Credentials);

    /// Current link status
    fn is_connected(&self) -> bool;

    /// Address assigned to the device
    fn local_address(&self) -> IpAddr;

    /// Received signal strength (dBm)
    fn signal_strength(&self) -> i8;

    /// Burned-in hardware address
    fn hardware_address(&self) -> MacAddress;
}

/// Read-only view of the link that transports use to gate sends
pub trait LinkStatus {
    /// True only while the link is connected
    fn is_link_up(&self) -> bool;

    /// Hardware address of the device (stable across reconnects)
    fn hardware_address(&self) -> MacAddress;
}

/// Metadata captured when the link comes up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkInfo {
    pub address: IpAddr,
    pub rssi_dbm: i8,
}

/// State of the wireless link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Disconnected,
    Connecting,
    Connected(LinkInfo),
}

/// Poll pacing for link acquisition
#[derive(Debug, Clone)]
pub struct LinkConfig {
    pub credentials: Credentials,
    /// Pause between status polls (milliseconds)
    pub poll_interval_ms: u32,
    /// Status polls before giving up
    pub max_attempts: u32,
}

impl LinkConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            poll_interval_ms: LINK_POLL_INTERVAL_MS,
            max_attempts: LINK_MAX_POLL_ATTEMPTS,
        }
    }

    /// Set pause between status polls
    pub fn poll_interval_ms(mut self, ms: u32) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Set the poll budget
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self::new(Credentials::default())
    }
}

/// Owner of the wireless link
pub struct LinkManager<L: LinkDriver, D: Delay> {
    driver: L,
    delay: D,
    config: LinkConfig,
    state: LinkState,
}

impl<L: LinkDriver, D: Delay> LinkManager<L, D> {
    pub fn new(driver: L, delay: D, config: LinkConfig) -> Self {
        Self {
            driver,
            delay,
            config,
            state: LinkState::Disconnected,
        }
    }

    /// Connect the link, polling until it is up or the budget is spent
    ///
    /// Blocks the calling thread for at most
    /// `max_attempts × poll_interval_ms`. Exits early on the first poll that
    /// sees the link up.
    pub fn acquire_link(&mut self) -> Result<LinkInfo, LinkError> {
        log_info!("Connecting to network {}", self.config.credentials.ssid);
        self.state = LinkState::Connecting;
        self.driver.begin(&self.config.credentials);

        let mut attempts = 0;
        while !self.driver.is_connected() && attempts < self.config.max_attempts {
            self.delay.delay_ms(self.config.poll_interval_ms);
            attempts += 1;
        }

        if self.driver.is_connected() {
            let info = LinkInfo {
                address: self.driver.local_address(),
                rssi_dbm: self.driver.signal_strength(),
            };
            log_info!(
                "Link up after {} polls: address {}, signal {} dBm",
                attempts,
                info.address,
                info.rssi_dbm
            );
            self.state = LinkState::Connected(info);
            Ok(info)
        } else {
            log_warn!(
                "Link to {} not up after {} polls, check credentials",
                self.config.credentials.ssid,
                attempts
            );
            self.state = LinkState::Disconnected;
            Err(LinkError::Unavailable { attempts })
        }
    }

    /// State recorded by the last acquisition
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Address and signal strength, while connected
    pub fn link_info(&self) -> Option<LinkInfo> {
        match self.state {
            LinkState::Connected(info) => Some(info),
            _ => None,
        }
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    pub fn driver(&self) -> &L {
        &self.driver
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }
}

impl<L: LinkDriver, D: Delay> LinkStatus for LinkManager<L, D> {
    /// Acquired and still reported up by the driver
    fn is_link_up(&self) -> bool {
        matches!(self.state, LinkState::Connected(_)) && self.driver.is_connected()
    }

    fn hardware_address(&self) -> MacAddress {
        self.driver.hardware_address()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::RecordingDelay;
    use alloc::string::String;
    use core::cell::Cell;
    use core::net::Ipv4Addr;

    /// Driver that reports connected after a given number of status polls
    struct StubDriver {
        up_after_polls: Option<u32>,
        polls: Cell<u32>,
        begins: u32,
        dropped: Cell<bool>,
    }

    impl StubDriver {
        fn up_after(polls: u32) -> Self {
            Self {
                up_after_polls: Some(polls),
                polls: Cell::new(0),
                begins: 0,
                dropped: Cell::new(false),
            }
        }

        fn never_up() -> Self {
            Self {
                up_after_polls: None,
                ..Self::up_after(0)
            }
        }
    }

    impl LinkDriver for StubDriver {
        fn begin(&mut self, _credentials: &Credentials) {
            self.begins += 1;
        }

        fn is_connected(&self) -> bool {
            let seen = self.polls.get();
            self.polls.set(seen + 1);
            !self.dropped.get() && self.up_after_polls.map_or(false, |n| seen >= n)
        }

        fn local_address(&self) -> IpAddr {
            IpAddr::V4(Ipv4Addr::new(192, 168, 1, 42))
        }

        fn signal_strength(&self) -> i8 {
            -61
        }

        fn hardware_address(&self) -> MacAddress {
            MacAddress::new([0x24, 0x6F, 0x28, 0xAB, 0xCD, 0xEF])
        }
    }

    #[test]
    fn gives_up_after_sixty_polls() {
        let mut link = LinkManager::new(StubDriver::never_up(), RecordingDelay::new(), LinkConfig::default());

        let err = link.acquire_link().unwrap_err();

        assert_eq!(err, LinkError::Unavailable { attempts: 60 });
        assert_eq!(link.delay().count(), 60);
        assert!(link.delay().pauses().iter().all(|&ms| ms == 500));
        assert_eq!(link.delay().total_ms(), 30_000);
        assert_eq!(link.driver().begins, 1);
        assert_eq!(link.state(), LinkState::Disconnected);
        assert!(!link.is_link_up());
    }

    #[test]
    fn stops_polling_once_connected() {
        let mut link = LinkManager::new(StubDriver::up_after(3), RecordingDelay::new(), LinkConfig::default());

        let info = link.acquire_link().unwrap();

        assert_eq!(link.delay().count(), 3);
        assert_eq!(info.address, IpAddr::V4(Ipv4Addr::new(192, 168, 1, 42)));
        assert_eq!(info.rssi_dbm, -61);
        assert_eq!(link.link_info(), Some(info));
        assert!(link.is_link_up());
    }

    #[test]
    fn already_connected_needs_no_pause() {
        let mut link = LinkManager::new(StubDriver::up_after(0), RecordingDelay::new(), LinkConfig::default());

        assert!(link.acquire_link().is_ok());
        assert_eq!(link.delay().count(), 0);
    }

    #[test]
    fn honours_custom_budget() {
        let config = LinkConfig::default().poll_interval_ms(100).max_attempts(5);
        let mut link = LinkManager::new(StubDriver::never_up(), RecordingDelay::new(), config);

        assert_eq!(link.acquire_link(), Err(LinkError::Unavailable { attempts: 5 }));
        assert_eq!(link.delay().pauses(), &[100, 100, 100, 100, 100]);
    }

    #[test]
    fn dropped_link_reads_as_down() {
        let mut link = LinkManager::new(StubDriver::up_after(0), RecordingDelay::new(), LinkConfig::default());
        link.acquire_link().unwrap();

        link.driver().dropped.set(true);

        assert!(!link.is_link_up());
    }

    #[test]
    fn mac_address_formats() {
        let mac = MacAddress::new([0x24, 0x6F, 0x28, 0xAB, 0xCD, 0xEF]);
        let mut compact = String::new();
        mac.write_compact(&mut compact).unwrap();

        assert_eq!(alloc::format!("{}", mac), "24:6F:28:AB:CD:EF");
        assert_eq!(compact, "246F28ABCDEF");
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::new("plant", "hunter2");
        let text = alloc::format!("{:?}", creds);

        assert!(text.contains("plant"));
        assert!(!text.contains("hunter2"));
    }
}
