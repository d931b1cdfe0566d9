use crate::endpoint::Endpoint;
use scope_core::{Result, ScopeError};
use std::net::{SocketAddr, UdpSocket};
use tracing::{debug, info};

/// One received datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datagram {
    /// Raw payload, at most `recv_buffer` bytes.
    pub payload: Vec<u8>,
    /// Who sent it.
    pub source: SocketAddr,
}

/// A bound UDP endpoint handing out one datagram per call.
///
/// The socket is closed when the receiver is dropped.
#[derive(Debug)]
pub struct Receiver {
    socket:      UdpSocket,
    endpoint:    Endpoint,
    recv_buffer: usize,
}

impl Receiver {
    /// Default receive buffer: room for a short float such as `"-3.14159"`.
    pub const DEFAULT_RECV_BUFFER: usize = 10;

    /// Bind `endpoint`.  `recv_buffer` caps the payload length; longer
    /// datagrams are truncated by the platform.
    ///
    /// # Errors
    ///
    /// [`ScopeError::Bind`] if the address is in use, not local, or needs
    /// privileges we lack.
    pub fn bind(endpoint: Endpoint, recv_buffer: usize) -> Result<Self> {
        let socket = UdpSocket::bind(endpoint.as_socket_addr()).map_err(|source| ScopeError::Bind {
            endpoint: endpoint.as_socket_addr(),
            source,
        })?;

        // Port 0 resolves to an ephemeral port only after binding.
        let endpoint = socket.local_addr().map(Endpoint::from).unwrap_or(endpoint);
        info!("Listening for datagrams on {endpoint}");

        Ok(Self {
            socket,
            endpoint,
            recv_buffer: recv_buffer.max(1),
        })
    }

    /// The endpoint actually bound.
    pub fn local_endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Block until the next datagram arrives and return it.
    ///
    /// No timeout and no retry: exactly one datagram per call.
    ///
    /// # Errors
    ///
    /// [`ScopeError::Transport`] on any socket error.
    pub fn receive_one(&self) -> Result<Datagram> {
        let mut buf = vec![0u8; self.recv_buffer];
        let (len, source) = self.socket.recv_from(&mut buf).map_err(ScopeError::Transport)?;
        buf.truncate(len);

        debug!("{len} byte(s) from {source}");
        Ok(Datagram {
            payload: buf,
            source,
        })
    }
}
