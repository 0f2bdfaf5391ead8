//! Process configuration, read once at startup.

use std::net::SocketAddr;

use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "BIZDASH_BIND_ADDR";
pub const SESSION_SECRET_VAR: &str = "BIZDASH_SESSION_SECRET";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEV_SECRET: &str = "dev-secret";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("BIZDASH_SESSION_SECRET is set but empty")]
    EmptySecret,

    #[error("invalid BIZDASH_BIND_ADDR '{0}'")]
    InvalidBindAddr(String),
}

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Must match the secret the backend encrypts session tokens with.
    pub session_secret: String,
}

impl AppConfig {
    pub fn new(session_secret: impl Into<String>) -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            session_secret: session_secret.into(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source (environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let session_secret = match lookup(SESSION_SECRET_VAR) {
            Some(secret) if secret.is_empty() => return Err(ConfigError::EmptySecret),
            Some(secret) => secret,
            None => {
                tracing::warn!("{SESSION_SECRET_VAR} not set; using insecure dev default");
                DEV_SECRET.to_string()
            }
        };

        let raw_addr = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(raw_addr.clone()))?;

        Ok(Self {
            bind_addr,
            session_secret,
        })
    }
}

impl core::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("session_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.session_secret, DEV_SECRET);
    }

    #[test]
    fn reads_values() {
        let config = AppConfig::from_lookup(lookup(&[
            (SESSION_SECRET_VAR, "s3cret"),
            (BIND_ADDR_VAR, "127.0.0.1:9000"),
        ]))
        .unwrap();
        assert_eq!(config.session_secret, "s3cret");
        assert_eq!(config.bind_addr.port(), 9000);
    }

    #[test]
    fn empty_secret_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[(SESSION_SECRET_VAR, "")])).unwrap_err();
        assert_eq!(err, ConfigError::EmptySecret);
    }

    #[test]
    fn bad_bind_addr_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            (SESSION_SECRET_VAR, "x"),
            (BIND_ADDR_VAR, "nowhere"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidBindAddr("nowhere".to_string()));
    }

    #[test]
    fn debug_redacts_secret() {
        let rendered = format!("{:?}", AppConfig::new("s3cret"));
        assert!(!rendered.contains("s3cret"));
    }
}
