//! Client settings resolved from the process environment.
use std::fmt;
use std::time::Duration;

use crate::constants::{DEFAULT_TIMEOUT, DOKPLOY_TIMEOUT_VAR, DOKPLOY_TOKEN_VAR, DOKPLOY_URL_VAR};
use crate::error::ConfigError;

/// Connection settings for a [`DokployClient`](super::DokployClient).
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Instance URL, e.g. `https://dokploy.example.com`.
    pub url: String,
    /// API token.
    pub token: String,
    /// Default per-request timeout.
    pub timeout: Duration,
}

impl ClientSettings {
    /// Read `DOKPLOY_URL`, `DOKPLOY_TOKEN` and the optional `DOKPLOY_TIMEOUT`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL or token is missing or empty, or if the
    /// timeout is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ConfigError::MissingVar(name.to_string()))
        };

        let url = required(DOKPLOY_URL_VAR)?;
        let token = required(DOKPLOY_TOKEN_VAR)?;
        let timeout = match lookup(DOKPLOY_TIMEOUT_VAR).filter(|v| !v.trim().is_empty()) {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            url,
            token,
            timeout,
        })
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|&secs| secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigError::InvalidTimeout {
            value: raw.to_string(),
        })
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("url", &self.url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
