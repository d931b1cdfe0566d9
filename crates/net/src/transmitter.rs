use crate::endpoint::Endpoint;
use scope_core::{Result, ScopeError};
use std::fmt::Display;
use std::net::UdpSocket;

/// Fire-and-forget sender of numeric datagrams.
#[derive(Debug)]
pub struct Transmitter {
    socket: UdpSocket,
    dest:   Endpoint,
}

impl Transmitter {
    /// Bind an ephemeral local port for sending to `dest`.
    pub fn new(dest: Endpoint) -> Result<Self> {
        let local = Endpoint::new(unspecified_like(dest), 0);
        let socket = UdpSocket::bind(local.as_socket_addr()).map_err(|source| ScopeError::Bind {
            endpoint: local.as_socket_addr(),
            source,
        })?;
        Ok(Self { socket, dest })
    }

    pub fn dest(&self) -> Endpoint {
        self.dest
    }

    /// Send the text form of `value` as one datagram.
    pub fn send_value(&self, value: impl Display) -> Result<usize> {
        self.send_raw(value.to_string().as_bytes())
    }

    /// Send arbitrary bytes as one datagram.
    pub fn send_raw(&self, payload: &[u8]) -> Result<usize> {
        self.socket
            .send_to(payload, self.dest.as_socket_addr())
            .map_err(ScopeError::Transport)
    }
}

/// Wildcard address of the same family as `dest`.
fn unspecified_like(dest: Endpoint) -> std::net::IpAddr {
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
    match dest.ip() {
        IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
    }
}
