//! Deployment environments.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A deployment target class.
///
/// Parsing is case-insensitive and strict: anything outside the four known
/// names is rejected. The naming functions in [`crate::domain`] take plain
/// `&str` instead, so free-form environments still get a generic pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Live deployment on the base domain.
    Production,
    /// Pre-production deployment.
    Staging,
    /// Shared development deployment.
    Development,
    /// Ephemeral per-pull-request deployment.
    Preview,
}

impl Environment {
    /// All environments in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Production,
        Self::Staging,
        Self::Development,
        Self::Preview,
    ];

    /// Lowercase name as used in config files and domain names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Staging => "staging",
            Self::Development => "development",
            Self::Preview => "preview",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|env| env.as_str() == lower)
            .ok_or_else(|| ConfigError::UnknownEnvironment(s.to_string()))
    }
}
