use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

pub mod cors;

pub use cors::create_cors_layer;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid PORT '{0}'")]
    InvalidPort(String),

    #[error("Invalid HOST '{0}'")]
    InvalidHost(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Anything other than `production` (case-insensitive) is development.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub environment: Environment,
    pub allowed_origins: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            environment: Environment::Development,
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = match lookup("HOST") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidHost(raw.clone()))?,
            None => defaults.host,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => defaults.port,
        };

        let environment = lookup("RUST_ENV")
            .map(|v| Environment::parse(&v))
            .unwrap_or_default();

        let allowed_origins = lookup("CORS_ALLOWED_ORIGINS").unwrap_or(defaults.allowed_origins);

        Ok(Self {
            host,
            port,
            environment,
            allowed_origins,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3001);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.addr().to_string(), "0.0.0.0:3001");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("RUST_ENV", "Production"),
        ])
        .unwrap();

        assert_eq!(config.addr().to_string(), "127.0.0.1:8080");
        assert!(config.environment.is_production());
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = config_from(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(p) if p == "not-a-port"));
    }

    #[test]
    fn test_unknown_environment_is_development() {
        assert_eq!(Environment::parse("staging"), Environment::Development);
        assert_eq!(Environment::parse(" production "), Environment::Production);
    }
}
