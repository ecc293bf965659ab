//! TOML configuration file loading with defaults merging.
use std::path::Path;

use toml::Table;

use super::merge::deep_merge;
use crate::error::ParseError;

/// Load a TOML file into a table.
///
/// A missing file is not an error: it yields an empty table so optional
/// config layers can be skipped transparently.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if the file exists but cannot be read, or
/// [`ParseError::Toml`] if its contents are not valid TOML.
pub fn load(path: &Path) -> Result<Table, ParseError> {
    if !path.exists() {
        tracing::debug!("config file not found, using empty table: {}", path.display());
        return Ok(Table::new());
    }

    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;

    content.parse::<Table>().map_err(|source| ParseError::Toml {
        path: path.display().to_string(),
        source,
    })
}

/// Load the project config and deep-merge it over the defaults file.
///
/// Project values win at every nesting level. `defaults_path` of `None`, or a
/// defaults file that does not exist, contributes nothing.
///
/// # Errors
///
/// Returns an error if either file exists but cannot be read or parsed.
pub fn load_merged(project_path: &Path, defaults_path: Option<&Path>) -> Result<Table, ParseError> {
    let defaults = match defaults_path {
        Some(path) => load(path)?,
        None => Table::new(),
    };
    let project = load(project_path)?;

    tracing::debug!(
        "merging {} project keys over {} default keys",
        project.len(),
        defaults.len()
    );
    Ok(deep_merge(&defaults, &project))
}
