//! Shared helpers for Dokploy deployment automation in CI.
//!
//! Four independent components, usually called in this order by a workflow
//! step:
//!
//! - **[`config`]** — load `dokploy.toml`, deep-merge it over defaults, read
//!   the project name and per-environment sections
//! - **[`domain`]** — derive the domain, URL and application name for an
//!   environment (and PR number, for previews)
//! - **[`port`]** — resolve the application port from config, `.env` or the
//!   Dockerfile
//! - **[`api`]** — a blocking Dokploy API client with typed errors
//!
//! [`output`] writes step outputs back to GitHub Actions, and [`kinds`] holds
//! the closed sets of names the API accepts.
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod api;
pub mod config;
pub mod constants;
pub mod domain;
pub mod environment;
pub mod error;
pub mod kinds;
pub mod logging;
pub mod output;
pub mod port;

pub use environment::Environment;
pub use error::{ApiError, ConfigError, Error, ParseError};
