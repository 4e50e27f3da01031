//! OSC over UDP transport
//!
//! Each record becomes one OSC message in its own datagram. Payload values
//! are sent as 32-bit float arguments (`f` type tag).

use rosc::{encoder, OscMessage, OscPacket, OscType};
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};

use super::Transport;
use crate::error::{ReplayError, Result};

/// UDP socket bound to an ephemeral local port, sending to one fixed target
#[derive(Debug)]
pub struct OscUdpTransport {
    socket: UdpSocket,
    target: SocketAddr,
}

impl OscUdpTransport {
    /// Resolve `host:port` and bind a local socket of the matching family
    pub fn new(host: &str, port: u16) -> Result<Self> {
        let target = (host, port)
            .to_socket_addrs()
            .map_err(|e| ReplayError::Config(format!("Cannot resolve {}:{}: {}", host, port, e)))?
            .next()
            .ok_or_else(|| ReplayError::Config(format!("No address found for {}:{}", host, port)))?;

        Self::connect(target)
    }

    /// Bind a local socket for an already-resolved target
    pub fn connect(target: SocketAddr) -> Result<Self> {
        let bind_addr = if target.is_ipv4() {
            "0.0.0.0:0"
        } else {
            "[::]:0"
        };
        let socket = UdpSocket::bind(bind_addr).map_err(|e| {
            ReplayError::Io(e).with_context("Failed to create UDP socket")
        })?;

        tracing::debug!(
            "OSC transport bound to {:?}, sending to {}",
            socket.local_addr().ok(),
            target
        );

        Ok(Self { socket, target })
    }

    /// Destination address
    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Encode one message into an OSC datagram
    pub fn encode(address: &str, payload: &[f64]) -> Result<Vec<u8>> {
        let packet = OscPacket::Message(OscMessage {
            addr: address.to_string(),
            args: payload.iter().map(|&v| OscType::Float(v as f32)).collect(),
        });

        encoder::encode(&packet)
            .map_err(|e| ReplayError::Encode(format!("{}: {:?}", address, e)))
    }
}

impl Transport for OscUdpTransport {
    fn send(&mut self, address: &str, payload: &[f64]) -> Result<()> {
        let buf = Self::encode(address, payload)?;
        let sent = self
            .socket
            .send_to(&buf, self.target)
            .map_err(|e| ReplayError::Transmission(format!("{} -> {}: {}", address, self.target, e)))?;

        if sent != buf.len() {
            return Err(ReplayError::Transmission(format!(
                "{} -> {}: short write ({} of {} bytes)",
                address,
                self.target,
                sent,
                buf.len()
            )));
        }
        Ok(())
    }
}
