pub mod schema;
pub mod watcher;

pub use schema::{ChartConfig, ListenConfig, PayloadConfig, ScopeConfig};
pub use watcher::ConfigWatcher;

use scope_core::{Result, ScopeError};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `ScopeConfig::default()` if
/// the file doesn't exist; the defaults listen on `127.0.0.1:12345`.
pub fn load(path: impl AsRef<Path>) -> Result<ScopeConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(ScopeConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| ScopeError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse configuration from TOML text.
pub fn parse(raw: &str) -> Result<ScopeConfig> {
    toml::from_str(raw).map_err(|e| ScopeError::Config(format!("TOML parse error: {e}")))
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("udpscope").join("scope.toml")
}
