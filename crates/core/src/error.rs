use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("cannot bind {endpoint}")]
    Bind {
        endpoint: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("transport error")]
    Transport(#[source] std::io::Error),

    #[error("payload is not a number: {}", render_payload(.payload))]
    Decode { payload: Vec<u8> },

    #[error("config error: {0}")]
    Config(String),

    #[error("display error: {0}")]
    Display(String),

    /// A fatal error raised inside the receive loop after the UI had started.
    #[error("receive loop halted")]
    Halted(#[source] Arc<ScopeError>),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = ScopeError> = std::result::Result<T, E>;

/// Render raw payload bytes for diagnostics: text when it is UTF-8, escaped
/// bytes otherwise.
pub fn render_payload(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) => format!("{text:?}"),
        Err(_) => format!("b\"{}\"", payload.escape_ascii()),
    }
}
