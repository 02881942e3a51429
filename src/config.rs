//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, ServerError};

const DEFAULT_ASSET_ROOT: &str = "./attached_assets";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_ARCHIVE_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory the resolver's source filenames are read from
    pub asset_root: PathBuf,
    pub bind_addr: SocketAddr,
    /// Upper bound on building one bulk archive
    pub archive_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from(DEFAULT_ASSET_ROOT),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            archive_timeout: Duration::from_secs(DEFAULT_ARCHIVE_TIMEOUT_SECS),
        }
    }
}

impl ServerConfig {
    /// Read `ASSET_ROOT`, `BIND_ADDR` and `ARCHIVE_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup, falling back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let asset_root = lookup("ASSET_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET_ROOT));

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse()
            .map_err(|e| ServerError::Config(format!("BIND_ADDR {:?}: {}", bind_raw, e)))?;

        let archive_timeout = match lookup("ARCHIVE_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|e| {
                    ServerError::Config(format!("ARCHIVE_TIMEOUT_SECS {:?}: {}", raw, e))
                })?;
                if secs == 0 {
                    return Err(ServerError::Config(
                        "ARCHIVE_TIMEOUT_SECS must be positive".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_ARCHIVE_TIMEOUT_SECS),
        };

        Ok(Self {
            asset_root,
            bind_addr,
            archive_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        let default = ServerConfig::default();
        assert_eq!(config.asset_root, default.asset_root);
        assert_eq!(config.bind_addr, default.bind_addr);
        assert_eq!(config.archive_timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("ASSET_ROOT", "/srv/assets"),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("ARCHIVE_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.asset_root, PathBuf::from("/srv/assets"));
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.archive_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_malformed_values() {
        assert!(matches!(
            ServerConfig::from_lookup(lookup(&[("BIND_ADDR", "nowhere")])),
            Err(ServerError::Config(_))
        ));
        assert!(matches!(
            ServerConfig::from_lookup(lookup(&[("ARCHIVE_TIMEOUT_SECS", "soon")])),
            Err(ServerError::Config(_))
        ));
        assert!(matches!(
            ServerConfig::from_lookup(lookup(&[("ARCHIVE_TIMEOUT_SECS", "0")])),
            Err(ServerError::Config(_))
        ));
    }
}
