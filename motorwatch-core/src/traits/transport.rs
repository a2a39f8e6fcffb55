//! Delivery transport abstraction
//!
//! Two collectors exist: an inference endpoint answered one request at a
//! time, and a message broker fed over a long-lived session. Both sit behind
//! [`Transport`], so the sampling loop is written once and the variant is
//! picked when the uplink is built. Test suites substitute fault-injecting
//! transports the same way.

use alloc::boxed::Box;

use crate::link::LinkStatus;
use crate::outcome::{DeliveryOutcome, DeliveryStats};
use crate::reading::Reading;

/// One strategy for getting readings to a collector
///
/// ## Contract
///
/// - `send` checks `link.is_link_up()` first and returns
///   [`DeliveryOutcome::LinkUnavailable`] without any I/O when it is down.
/// - `send` never panics and never returns early without an outcome; every
///   failure is a distinguishable variant.
/// - One send is in flight at a time; sends happen in call order.
pub trait Transport {
    /// Human-readable name for this transport
    fn name(&self) -> &'static str;

    /// Deliver one reading
    fn send(&mut self, link: &dyn LinkStatus, reading: Reading) -> DeliveryOutcome;

    /// Periodic duty, independent of `send`
    ///
    /// Session transports keep their session alive here. Stateless
    /// transports have nothing to do.
    fn service(&mut self, _link: &dyn LinkStatus) {}

    /// Counters since construction
    fn stats(&self) -> DeliveryStats;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn send(&mut self, link: &dyn LinkStatus, reading: Reading) -> DeliveryOutcome {
        (**self).send(link, reading)
    }

    fn service(&mut self, link: &dyn LinkStatus) {
        (**self).service(link)
    }

    fn stats(&self) -> DeliveryStats {
        (**self).stats()
    }
}
