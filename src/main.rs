//! udpscope: plots numbers arriving as UDP datagrams, live.
//!
//! Run with:  `RUST_LOG=info udpscope`, then e.g. `echo -n 1.5 | nc -u -w0 127.0.0.1 12345`

use anyhow::{Context, Result};
use scope_net::{Endpoint, Receiver};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Structured logging on stderr; stdout carries the sample echo.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("udpscope v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = scope_config::default_path();
    let config = scope_config::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let endpoint = Endpoint::from(config.listen.socket_addr());
    let receiver = Receiver::bind(endpoint, config.listen.recv_buffer)?;

    scope_app::run(config, receiver).map_err(Into::into)
}
