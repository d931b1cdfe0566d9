use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// An (address, port) pair identifying where to listen or send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint(SocketAddr);

impl Endpoint {
    pub const DEFAULT_PORT: u16 = 12345;

    #[must_use]
    pub const fn new(addr: IpAddr, port: u16) -> Self {
        Self(SocketAddr::new(addr, port))
    }

    /// A loopback endpoint on the given port.
    #[must_use]
    pub const fn localhost(port: u16) -> Self {
        Self::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port)
    }

    #[must_use]
    pub const fn ip(&self) -> IpAddr {
        self.0.ip()
    }

    #[must_use]
    pub const fn port(&self) -> u16 {
        self.0.port()
    }

    #[must_use]
    pub const fn as_socket_addr(&self) -> SocketAddr {
        self.0
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::localhost(Self::DEFAULT_PORT)
    }
}

impl From<SocketAddr> for Endpoint {
    fn from(addr: SocketAddr) -> Self {
        Self(addr)
    }
}

impl From<Endpoint> for SocketAddr {
    fn from(ep: Endpoint) -> Self {
        ep.0
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_loopback_12345() {
        assert_eq!(Endpoint::default().to_string(), "127.0.0.1:12345");
    }

    #[test]
    fn socket_addr_round_trip() {
        let addr: SocketAddr = "10.0.0.7:9000".parse().unwrap();
        let ep = Endpoint::from(addr);
        assert_eq!(ep.port(), 9000);
        assert_eq!(SocketAddr::from(ep), addr);
    }
}
