//! Bridge and demo-server configuration.
//!
//! [`BridgeConfig`] is handed to a mount explicitly — the debug flag is
//! never read from ambient global settings. [`ServerConfig`] follows
//! 12-factor style for the demo binary: all settings come from environment
//! variables (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;

/// Per-mount bridge configuration.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Expose error details in responses and report `true` from
    /// [`crate::context::RequestContext::is_debug`].
    pub debug: bool,

    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            debug: false,
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Top-level configuration for the demo server binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Bridge configuration passed to every mount.
    pub bridge: BridgeConfig,
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()?;

        let debug = parse_env_bool("DEBUG", false);
        let max_body_bytes = parse_env("MAX_BODY_BYTES", 1024 * 1024);

        Ok(Self {
            listen_addr,
            bridge: BridgeConfig {
                debug,
                max_body_bytes,
            },
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().as_deref() {
        Some("true") | Some("TRUE") | Some("1") => true,
        Some("false") | Some("FALSE") | Some("0") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_non_debug_with_one_mib_cap() {
        let config = BridgeConfig::default();
        assert!(!config.debug);
        assert_eq!(config.max_body_bytes, 1024 * 1024);
    }
}
