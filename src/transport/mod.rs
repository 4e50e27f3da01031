//! Transport boundary
//!
//! The replayer only needs one capability: send an address with a float
//! payload to a destination fixed at construction time. [`Transport`] is
//! that seam. [`OscUdpTransport`] is the production implementation; tests
//! substitute mocks or recording transports.

pub mod osc_udp;

pub use osc_udp::OscUdpTransport;

use crate::error::Result;

/// Outbound message sink
///
/// Implementations must be `Send` so a transport can be moved onto a
/// replay thread. `send` is synchronous: the replayer does not start the
/// next step until it returns.
#[cfg_attr(test, mockall::automock)]
pub trait Transport: Send {
    /// Send one message
    fn send(&mut self, address: &str, payload: &[f64]) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, address: &str, payload: &[f64]) -> Result<()> {
        (**self).send(address, payload)
    }
}
