//! Application port detection.
//!
//! Resolution order: explicit config, then `APP_PORT` in the `.env` file,
//! then `ARG APP_PORT=<n>` in the Dockerfile, then the caller's default.
//! Malformed values never fail resolution; they fall through to the next tier.
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::constants::APP_PORT_VAR;

/// Matches `ARG APP_PORT=<digits>` at the start of any line.
#[allow(clippy::expect_used)]
static DOCKERFILE_APP_PORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?m)^ARG\s+{APP_PORT_VAR}\s*=\s*([0-9]+)"))
        .expect("literal pattern compiles")
});

/// Where a resolved port came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSource {
    /// Explicitly set in project config.
    Config,
    /// `APP_PORT` in the env file.
    EnvFile,
    /// `ARG APP_PORT=` in the Dockerfile.
    Dockerfile,
    /// Caller-supplied fallback.
    Default,
}

impl PortSource {
    /// Short label used in logs and step outputs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::EnvFile => "env-file",
            Self::Dockerfile => "dockerfile",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for PortSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved port and the tier that supplied it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortResolution {
    /// The port number.
    pub port: u16,
    /// Which input supplied it.
    pub source: PortSource,
}

/// Read an optional file, treating unreadable files like missing ones.
fn read_optional(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            tracing::warn!("ignoring unreadable {}: {e}", path.display());
            None
        }
    }
}

/// Parse `.env` style `KEY=value` lines.
///
/// Blank lines, `#` comments and lines without `=` are skipped. Keys and
/// values are trimmed and surrounding quotes are stripped from values. No
/// multiline values, escapes or variable expansion.
#[must_use]
pub fn parse_env(content: &str) -> BTreeMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

/// Read and parse an env file; a missing file yields an empty map.
#[must_use]
pub fn read_env_file(path: &Path) -> BTreeMap<String, String> {
    read_optional(path)
        .map(|content| parse_env(&content))
        .unwrap_or_default()
}

/// Extract the first `ARG APP_PORT=<n>` value from Dockerfile contents.
fn dockerfile_port(content: &str) -> Option<u16> {
    DOCKERFILE_APP_PORT
        .captures(content)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

/// Detect the port from the env file and Dockerfile, without fallbacks.
///
/// Returns `None` when neither file supplies a usable value.
#[must_use]
pub fn detect_port(env_path: &Path, dockerfile_path: &Path) -> Option<PortResolution> {
    let env_vars = read_env_file(env_path);
    if let Some(raw) = env_vars.get(APP_PORT_VAR) {
        match raw.parse::<u16>() {
            Ok(port) => {
                return Some(PortResolution {
                    port,
                    source: PortSource::EnvFile,
                });
            }
            Err(_) => tracing::debug!("ignoring non-numeric {APP_PORT_VAR}={raw:?}"),
        }
    }

    let port = read_optional(dockerfile_path).and_then(|content| dockerfile_port(&content))?;
    Some(PortResolution {
        port,
        source: PortSource::Dockerfile,
    })
}

/// Resolve the application port through the full fallback chain.
#[must_use]
pub fn get_port(
    config_port: Option<u16>,
    env_path: &Path,
    dockerfile_path: &Path,
    default: u16,
) -> PortResolution {
    let resolution = config_port
        .map(|port| PortResolution {
            port,
            source: PortSource::Config,
        })
        .or_else(|| detect_port(env_path, dockerfile_path))
        .unwrap_or(PortResolution {
            port: default,
            source: PortSource::Default,
        });

    tracing::debug!("app port {} (from {})", resolution.port, resolution.source);
    resolution
}
