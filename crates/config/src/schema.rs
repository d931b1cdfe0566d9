use scope_core::{MalformedPolicy, TrimPolicy};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Root configuration structure parsed from `scope.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScopeConfig {
    /// Where to listen for datagrams.
    pub listen: ListenConfig,
    /// How many samples to keep.
    pub buffer: TrimPolicy,
    /// Handling of payloads that do not parse as numbers.
    pub payload: PayloadConfig,
    /// Chart appearance.
    pub chart: ChartConfig,
}

/// The receiving endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    pub address: IpAddr,
    pub port: u16,
    /// Receive buffer in bytes; longer payloads are truncated.
    pub recv_buffer: usize,
}

impl ListenConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address:     IpAddr::V4(Ipv4Addr::LOCALHOST),
            port:        12345,
            recv_buffer: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PayloadConfig {
    pub on_malformed: MalformedPolicy,
}

/// Chart styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Window title.
    pub title: String,
    /// Line and marker colour (hex, e.g. `"#0000ff"`).
    pub line_color: String,
    /// Plot background colour.
    pub background: String,
    /// Axis, tick and label colour.
    pub axis_color: String,
    /// Line width in logical pixels.
    pub line_width: f32,
    /// Marker circle radius in logical pixels.
    pub marker_radius: f32,
    /// Tick label size in points.
    pub label_size: f32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title:         "udpscope".to_string(),
            line_color:    "#0000ff".to_string(),
            background:    "#ffffff".to_string(),
            axis_color:    "#444444".to_string(),
            line_width:    1.5,
            marker_radius: 3.0,
            label_size:    11.0,
        }
    }
}
