use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use reqwest::Url;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM: &str = "http://localhost:8080";
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProxyConfig {
    pub bind_addr: SocketAddr,
    pub upstream: Url,
    pub static_dir: PathBuf,
}

impl ProxyConfig {
    /// Reads `PROXY_HOST`, `PROXY_PORT`, `UPSTREAM_URL` and `STATIC_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("PROXY_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PROXY_PORT") {
            Some(raw) => parse_port(&raw)?,
            None => DEFAULT_PORT,
        };
        let upstream = lookup("UPSTREAM_URL").unwrap_or_else(|| DEFAULT_UPSTREAM.to_string());
        let static_dir = lookup("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string());

        Ok(Self {
            bind_addr: SocketAddr::new(parse_host(&host)?, port),
            upstream: parse_upstream(&upstream)?,
            static_dir: PathBuf::from(static_dir),
        })
    }
}

fn parse_host(raw: &str) -> Result<IpAddr, ConfigError> {
    if raw.eq_ignore_ascii_case("localhost") {
        return Ok(IpAddr::V4(Ipv4Addr::LOCALHOST));
    }
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        key: "PROXY_HOST",
        message: format!("{raw:?} is not an IP address"),
    })
}

fn parse_port(raw: &str) -> Result<u16, ConfigError> {
    match raw.trim().parse::<u16>() {
        Ok(0) | Err(_) => Err(ConfigError::InvalidValue {
            key: "PROXY_PORT",
            message: format!("{raw:?} is not a port between 1 and 65535"),
        }),
        Ok(port) => Ok(port),
    }
}

fn parse_upstream(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
        key: "UPSTREAM_URL",
        message: format!("{raw:?} is not a valid URL ({e})"),
    })?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            key: "UPSTREAM_URL",
            message: format!("{raw:?} must be an http(s) origin"),
        });
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidValue {
            key: "UPSTREAM_URL",
            message: format!("{raw:?} must not carry a query or fragment"),
        });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ProxyConfig, ConfigError> {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        ProxyConfig::from_lookup(|key| map.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.upstream.as_str(), "http://localhost:8080/");
        assert_eq!(config.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn overrides() {
        let config = config_from(&[
            ("PROXY_HOST", "localhost"),
            ("PROXY_PORT", "3100"),
            ("UPSTREAM_URL", "http://127.0.0.1:1234"),
            ("STATIC_DIR", "/srv/www"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3100".parse().unwrap());
        assert_eq!(config.upstream.port(), Some(1234));
        assert_eq!(config.static_dir, PathBuf::from("/srv/www"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        for (key, value) in [
            ("PROXY_PORT", "0"),
            ("PROXY_PORT", "70000"),
            ("PROXY_PORT", "http"),
            ("PROXY_HOST", "my host"),
            ("UPSTREAM_URL", "localhost:8080"),
            ("UPSTREAM_URL", "ws://localhost:8080"),
            ("UPSTREAM_URL", "http://localhost:8080/?a=b"),
        ] {
            let err = config_from(&[(key, value)]).unwrap_err();
            let ConfigError::InvalidValue { key: reported, .. } = err;
            assert_eq!(reported, key, "{value}");
        }
    }
}
