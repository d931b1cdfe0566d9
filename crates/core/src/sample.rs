use crate::error::{render_payload, Result, ScopeError};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tracing::warn;

/// One decoded value, stamped with where and when it arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub value:       f64,
    pub source:      SocketAddr,
    pub received_at: DateTime<Local>,
}

impl Sample {
    pub fn new(value: f64, source: SocketAddr) -> Self {
        Self {
            value,
            source,
            received_at: Local::now(),
        }
    }
}

/// What to do with a datagram whose payload is not a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Log a warning and wait for the next datagram.
    #[default]
    Skip,
    /// Stop the receive loop.
    Fatal,
}

/// Parse a payload as the text of a single finite float.
///
/// Surrounding ASCII whitespace is ignored, so `echo 1.5 | nc -u` works.
/// NaN and infinities are rejected: they cannot be placed on the chart.
pub fn decode(payload: &[u8]) -> Result<f64> {
    let malformed = || ScopeError::Decode {
        payload: payload.to_vec(),
    };

    let text = std::str::from_utf8(payload.trim_ascii()).map_err(|_| malformed())?;
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(malformed()),
    }
}

/// Decode a datagram and apply `policy` to malformed payloads.
///
/// `Ok(None)` means the datagram was skipped.
pub fn ingest(payload: &[u8], source: SocketAddr, policy: MalformedPolicy) -> Result<Option<Sample>> {
    match decode(payload) {
        Ok(value) => Ok(Some(Sample::new(value, source))),
        Err(e) => match policy {
            MalformedPolicy::Skip => {
                warn!("Skipping datagram from {source}: {}", render_payload(payload));
                Ok(None)
            }
            MalformedPolicy::Fatal => Err(e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    #[test]
    fn decode_plain_float() {
        assert_eq!(decode(b"3.14159").unwrap(), 3.14159);
        assert_eq!(decode(b"-2").unwrap(), -2.0);
        assert_eq!(decode(b"1e3").unwrap(), 1000.0);
    }

    #[test]
    fn decode_tolerates_whitespace() {
        assert_eq!(decode(b" 1.0\n").unwrap(), 1.0);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(decode(b"abc"), Err(ScopeError::Decode { .. })));
        assert!(matches!(decode(b""), Err(ScopeError::Decode { .. })));
        assert!(matches!(decode(&[0xff, 0xfe]), Err(ScopeError::Decode { .. })));
    }

    #[test]
    fn decode_rejects_non_finite() {
        assert!(decode(b"nan").is_err());
        assert!(decode(b"inf").is_err());
    }

    #[test]
    fn skip_policy_drops_malformed() {
        for _ in 0..3 {
            let out = ingest(b"abc", peer(), MalformedPolicy::Skip).unwrap();
            assert!(out.is_none());
        }
    }

    #[test]
    fn fatal_policy_reports_malformed() {
        for _ in 0..3 {
            let err = ingest(b"abc", peer(), MalformedPolicy::Fatal).unwrap_err();
            assert!(matches!(err, ScopeError::Decode { ref payload } if payload == b"abc"));
        }
    }

    #[test]
    fn ingest_keeps_source() {
        let sample = ingest(b"2.0", peer(), MalformedPolicy::Fatal).unwrap().unwrap();
        assert_eq!(sample.value, 2.0);
        assert_eq!(sample.source, peer());
    }
}
