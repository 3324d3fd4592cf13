use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::{
    env,
    net::{IpAddr, SocketAddr},
};

const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub cors_allow_origins: Vec<String>,
    /// Upper bound for buffering a request body during validation.
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
            cors_allow_origins: vec!["http://localhost:8000".to_string()],
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, falling back to
    /// defaults for missing keys.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = match lookup("CREATIX_HOST") {
            Some(value) => value
                .parse()
                .map_err(|_| anyhow!("Invalid CREATIX_HOST value: {}", value))?,
            None => defaults.host,
        };

        let port = match lookup("CREATIX_PORT") {
            Some(value) => value
                .parse()
                .with_context(|| format!("Invalid CREATIX_PORT value: {}", value))?,
            None => defaults.port,
        };

        let cors_allow_origins = lookup("CORS_ALLOW_ORIGINS")
            .map(|value| parse_origins(&value))
            .unwrap_or(defaults.cors_allow_origins);

        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(value) => value
                .parse()
                .with_context(|| format!("Invalid MAX_BODY_BYTES value: {}", value))?,
            None => defaults.max_body_bytes,
        };

        Ok(Config {
            host,
            port,
            cors_allow_origins,
            max_body_bytes,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allow_origins.iter().any(|origin| origin == "*")
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
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
    fn missing_keys_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup(&[])).expect("config");
        assert_eq!(config.socket_addr(), SocketAddr::from(([0, 0, 0, 0], 3000)));
        assert_eq!(config.cors_allow_origins, vec!["http://localhost:8000"]);
        assert_eq!(config.max_body_bytes, 64 * 1024);
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn values_are_parsed_from_lookup() {
        let config = Config::from_lookup(lookup(&[
            ("CREATIX_HOST", "127.0.0.1"),
            ("CREATIX_PORT", "8080"),
            ("CORS_ALLOW_ORIGINS", "https://creatix.app/, *"),
            ("MAX_BODY_BYTES", "1024"),
        ]))
        .expect("config");
        assert_eq!(config.socket_addr(), SocketAddr::from(([127, 0, 0, 1], 8080)));
        assert_eq!(config.cors_allow_origins, vec!["https://creatix.app", "*"]);
        assert_eq!(config.max_body_bytes, 1024);
        assert!(config.allows_any_origin());
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = Config::from_lookup(lookup(&[("CREATIX_PORT", "http")])).unwrap_err();
        assert!(err.to_string().contains("CREATIX_PORT"));
    }
}
