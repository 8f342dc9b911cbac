//! Server configuration
//!
//! Read once at startup from the process environment (and `.env` if present).

use std::io;
use std::net::{IpAddr, SocketAddr};

use tracing::warn;

use crate::data::feed::NEO_FEED_BASE_URL;
use crate::service::DEMO_API_KEY;

/// Default listen port
pub const DEFAULT_PORT: u16 = 4000;

/// Default listen host: all interfaces
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Settings for the proxy server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Credential sent to the feed and mixed into cache keys
    pub api_key: String,
    pub feed_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_key: DEMO_API_KEY.to_string(),
            feed_url: NEO_FEED_BASE_URL.to_string(),
        }
    }
}

impl ServerConfig {
    /// Loads `.env` if present, then reads `HOST`, `PORT`, `NEO_API_KEY` and `NEO_FEED_URL`
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, "PORT is not a valid port, using {}", DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        Self {
            host: lookup("HOST").filter(|h| !h.is_empty()).unwrap_or(defaults.host),
            port,
            api_key: lookup("NEO_API_KEY").filter(|k| !k.is_empty()).unwrap_or(defaults.api_key),
            feed_url: lookup("NEO_FEED_URL").filter(|u| !u.is_empty()).unwrap_or(defaults.feed_url),
        }
    }

    /// Applies command-line overrides on top of the environment
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Socket address to bind
    ///
    /// IP literals are used as-is; host names are resolved, preferring IPv4.
    pub async fn socket_addr(&self) -> io::Result<SocketAddr> {
        if let Ok(ip) = self.host.parse::<IpAddr>() {
            return Ok(SocketAddr::new(ip, self.port));
        }

        let addrs: Vec<SocketAddr> = tokio::net::lookup_host((self.host.as_str(), self.port))
            .await?
            .collect();

        addrs
            .iter()
            .find(|addr| addr.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("HOST '{}' did not resolve to an address", self.host),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 4000);
        assert_eq!(config.api_key, "DEMO_KEY");
        assert_eq!(config.feed_url, "https://api.nasa.gov/neo/rest/v1/feed");
    }

    #[tokio::test]
    async fn test_reads_host_and_port() {
        let config = config_from(&[("HOST", "127.0.0.1"), ("PORT", "8080")]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.socket_addr().await.unwrap(), "127.0.0.1:8080".parse().unwrap());
    }

    #[test]
    fn test_invalid_port_falls_back_to_default() {
        let config = config_from(&[("PORT", "not-a-port")]);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_overrides_win_over_environment() {
        let config = config_from(&[("PORT", "8080")]).with_overrides(Some("127.0.0.1".to_string()), Some(9000));
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
    }

    #[tokio::test]
    async fn test_localhost_resolves_to_loopback() {
        let config = ServerConfig {
            host: "localhost".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr().await.unwrap(), "127.0.0.1:4000".parse().unwrap());
    }

    #[tokio::test]
    async fn test_unresolvable_host_is_an_error() {
        let config = ServerConfig {
            host: "no-such-host.invalid".to_string(),
            ..Default::default()
        };
        assert!(config.socket_addr().await.is_err());
    }
}
