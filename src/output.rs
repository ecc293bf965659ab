//! GitHub Actions step outputs.
use std::fs::OpenOptions;
use std::io::{self, Write as _};
use std::path::Path;

use uuid::Uuid;

use crate::constants::GITHUB_OUTPUT_VAR;

/// Fresh heredoc delimiter, unlikely to occur in any value.
fn delimiter() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("EOF_{}", hex.get(..8).unwrap_or(&hex))
}

/// Render one output entry.
///
/// Values containing a newline use the `key<<DELIM` heredoc form.
fn format_entry(key: &str, value: &str) -> String {
    if value.contains('\n') {
        let delim = delimiter();
        format!("{key}<<{delim}\n{value}\n{delim}\n")
    } else {
        format!("{key}={value}\n")
    }
}

/// Append `key`/`value` to the output file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or written.
pub fn write_output_to(path: &Path, key: &str, value: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(format_entry(key, value).as_bytes())
}

/// Append `key`/`value` to the file named by `GITHUB_OUTPUT`.
///
/// Does nothing outside GitHub Actions (variable unset or empty).
///
/// # Errors
///
/// Returns an error if the output file cannot be opened or written.
pub fn write_output(key: &str, value: &str) -> io::Result<()> {
    write_output_with(|name| std::env::var(name).ok(), key, value)
}

/// Like [`write_output`], resolving `GITHUB_OUTPUT` through `lookup`.
///
/// # Errors
///
/// Returns an error if the output file cannot be opened or written.
pub fn write_output_with(
    lookup: impl Fn(&str) -> Option<String>,
    key: &str,
    value: &str,
) -> io::Result<()> {
    match lookup(GITHUB_OUTPUT_VAR) {
        Some(path) if !path.is_empty() => write_output_to(Path::new(&path), key, value),
        _ => {
            tracing::debug!("{GITHUB_OUTPUT_VAR} not set, skipping output {key}");
            Ok(())
        }
    }
}
