//! Mock server configuration

use std::net::{Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3000;

/// Server configuration, read from the environment
///
/// | Variable | Default |
/// |----------|---------|
/// | `BOOKY_MOCK_PORT` | 3000 |
/// | `BOOKY_LOG_LEVEL` | info |
/// | `BOOKY_LOG_JSON` | false |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub log_level: String,
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: lookup("BOOKY_MOCK_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            log_level: lookup("BOOKY_LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: lookup("BOOKY_LOG_JSON")
                .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE"))
                .unwrap_or(false),
        }
    }

    /// Listen on all interfaces
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert!(!config.log_json);
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("BOOKY_MOCK_PORT", "4100"),
            ("BOOKY_LOG_LEVEL", "debug"),
            ("BOOKY_LOG_JSON", "true"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.port, 4100);
        assert_eq!(config.log_level, "debug");
        assert!(config.log_json);
        assert_eq!(config.bind_addr().port(), 4100);
    }

    #[test]
    fn test_invalid_port_falls_back() {
        let config = Config::from_lookup(|k| (k == "BOOKY_MOCK_PORT").then(|| "nope".to_string()));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
