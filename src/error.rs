//! Domain-specific error types for the Dokploy CI helpers.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Each component returns its own typed error (e.g., [`ParseError`] from the
//! config loader, [`ApiError`] from the API client) and callers that span
//! several components can collect them into [`Error`] via the `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! Error
//! ├── Config(ConfigError) — missing env vars, bad timeout, unknown names
//! ├── Parse(ParseError)   — unreadable or malformed TOML config files
//! └── Api(ApiError)       — auth, not found, HTTP status, transport, bad body
//! ```
//!
//! [`ApiError::Auth`] and [`ApiError::NotFound`] are raised regardless of a
//! request's `raise_on_error` flag; only [`ApiError::Status`] is optional.

use thiserror::Error;

/// Boxed error produced by an HTTP transport.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error type aggregating all component errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid runtime configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed or unreadable config file.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Dokploy API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

/// Errors that arise from constructing clients or parsing typed values.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is absent or empty.
    #[error("{0} environment variable is required")]
    MissingVar(String),

    /// The timeout override is not a positive integer number of seconds.
    #[error("Invalid timeout '{value}': expected a positive number of seconds")]
    InvalidTimeout {
        /// Raw value that failed to parse.
        value: String,
    },

    /// The environment name is not one of the known deployment targets.
    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),

    /// A value is outside one of the closed sets in [`crate::kinds`].
    #[error("Unknown {kind}: {value}")]
    UnknownKind {
        /// Human-readable name of the set, e.g. `build type`.
        kind: &'static str,
        /// Raw value that failed to parse.
        value: String,
    },
}

/// Errors that arise from loading TOML configuration files.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The file exists but is not valid TOML.
    #[error("Invalid TOML in {path}: {source}")]
    Toml {
        /// Path to the offending file.
        path: String,
        /// Underlying TOML parser error.
        source: toml::de::Error,
    },

    /// The file exists but could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors returned by the Dokploy API client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The credential was rejected (HTTP 401) or sign-in failed.
    #[error("{message}")]
    Auth {
        /// Human-readable description.
        message: String,
        /// HTTP status, when the error came from a response.
        status: Option<u16>,
        /// Raw response body, when available.
        body: Option<String>,
    },

    /// The requested resource does not exist (HTTP 404).
    #[error("Resource not found")]
    NotFound {
        /// Raw response body.
        body: String,
    },

    /// Any other non-2xx response.
    #[error("API request failed: {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The request never produced a response (DNS, connect, timeout).
    #[error("{message}: {source}")]
    Transport {
        /// Context for the failed request.
        message: String,
        /// Underlying transport error.
        source: TransportError,
    },

    /// A success response whose body is not what the API promises.
    #[error("{message}")]
    InvalidResponse {
        /// Human-readable description.
        message: String,
        /// Raw response body, when available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Whether this is an authentication failure.
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// Whether this is a 404 from the API.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// HTTP status code carried by the error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. } => *status,
            Self::NotFound { .. } => Some(404),
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } | Self::InvalidResponse { .. } => None,
        }
    }

    /// Raw response body carried by the error, if any.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Auth { body, .. } | Self::InvalidResponse { body, .. } => body.as_deref(),
            Self::NotFound { body } | Self::Status { body, .. } => Some(body),
            Self::Transport { .. } => None,
        }
    }
}
