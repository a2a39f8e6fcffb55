//! The sampling-loop side of the uplink
//!
//! [`Uplink`] ties the link manager to one transport and gives the caller
//! the control flow the device runs:
//!
//! 1. `start()` once at boot: bounded link acquisition.
//! 2. `deliver(reading)` once per sampling cycle: re-check the link, run
//!    another bounded acquisition if it dropped, then hand the reading to
//!    the transport.
//! 3. `service()` on its own cadence: the transport's keep-alive duty.
//!
//! ```rust,ignore
//! let mut uplink = Uplink::new(link, transport);
//! uplink.start()?;
//! loop {
//!     let outcome = uplink.deliver(sample());
//!     uplink.service();
//! }
//! ```

use crate::errors::LinkError;
use crate::link::{LinkDriver, LinkInfo, LinkManager, LinkStatus};
use crate::outcome::{DeliveryOutcome, DeliveryStats};
use crate::reading::Reading;
use crate::time::Delay;
use crate::traits::Transport;

/// Link manager plus the transport chosen at construction
pub struct Uplink<L: LinkDriver, D: Delay, T: Transport> {
    link: LinkManager<L, D>,
    transport: T,
}

impl<L: LinkDriver, D: Delay, T: Transport> Uplink<L, D, T> {
    pub fn new(link: LinkManager<L, D>, transport: T) -> Self {
        Self { link, transport }
    }

    /// Acquire the link for the first time
    pub fn start(&mut self) -> Result<LinkInfo, LinkError> {
        log_info!("Starting uplink over {} transport", self.transport.name());
        self.link.acquire_link()
    }

    /// Deliver one reading, re-acquiring the link first if it dropped
    pub fn deliver(&mut self, reading: Reading) -> DeliveryOutcome {
        if !self.link.is_link_up() {
            log_warn!("Link down before delivery, reconnecting");
            if self.link.acquire_link().is_err() {
                return DeliveryOutcome::LinkUnavailable;
            }
        }

        let outcome = self.transport.send(&self.link, reading);
        if outcome.is_success() {
            log_info!("Reading {}", outcome);
        } else {
            log_warn!("Reading not delivered: {}", outcome);
        }
        outcome
    }

    /// Run the transport's periodic duty
    pub fn service(&mut self) {
        self.transport.service(&self.link);
    }

    pub fn stats(&self) -> DeliveryStats {
        self.transport.stats()
    }

    pub fn link(&self) -> &LinkManager<L, D> {
        &self.link
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
