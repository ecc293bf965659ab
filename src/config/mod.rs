//! Project configuration: loading `dokploy.toml`, merging it over shared
//! defaults, and reading the few well-known keys callers need.
//!
//! Configuration is kept as a raw [`toml::Table`] so project files may carry
//! arbitrary keys for downstream actions. Absent keys read as empty values.

mod merge;
mod toml_loader;

pub use merge::deep_merge;
pub use toml_loader::{load, load_merged};

use toml::{Table, Value};

use crate::constants::GITHUB_REPOSITORY_VAR;

/// Resolve the project name.
///
/// Uses `project.name` when it is a non-empty string, otherwise the last
/// segment of `repository` (an `OWNER/REPO` identifier), otherwise `""`.
#[must_use]
pub fn get_project_name(config: &Table, repository: Option<&str>) -> String {
    let configured = config
        .get("project")
        .and_then(Value::as_table)
        .and_then(|project| project.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    if !configured.is_empty() {
        return configured.to_string();
    }

    repository
        .filter(|repo| !repo.is_empty())
        .and_then(|repo| repo.rsplit('/').next())
        .unwrap_or_default()
        .to_string()
}

/// [`get_project_name`] with the repository taken from `GITHUB_REPOSITORY`.
#[must_use]
pub fn project_name_from_env(config: &Table) -> String {
    project_name_from_lookup(config, |name| std::env::var(name).ok())
}

/// Like [`project_name_from_env`], reading `GITHUB_REPOSITORY` through
/// `lookup`.
#[must_use]
pub fn project_name_from_lookup(config: &Table, lookup: impl Fn(&str) -> Option<String>) -> String {
    let repository = lookup(GITHUB_REPOSITORY_VAR);
    get_project_name(config, repository.as_deref())
}

/// Return the `environments.<environment>` table.
///
/// `preview` falls back to `environments.development` when it has no section
/// of its own. Anything missing, or present but not a table, yields an empty
/// table.
#[must_use]
pub fn get_environment_config(config: &Table, environment: &str) -> Table {
    let Some(environments) = config.get("environments").and_then(Value::as_table) else {
        return Table::new();
    };

    let section = if environment == "preview" {
        environments
            .get("preview")
            .or_else(|| environments.get("development"))
    } else {
        environments.get(environment)
    };

    section
        .and_then(Value::as_table)
        .cloned()
        .unwrap_or_default()
}
