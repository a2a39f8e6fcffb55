//! Core Traits and Abstractions for MotorWatch
//!
//! ## Module Organization
//!
//! - [`time`] - Clock and delay seams for the blocking loops
//! - [`transport`] - The delivery strategy interface
//!
//! The link-layer seam ([`LinkDriver`](crate::link::LinkDriver)) lives with
//! the link manager it serves.

pub mod time;
pub mod transport;

pub use time::{Delay, TimeSource};
pub use transport::Transport;
