//! Recursive table merging.
use toml::{Table, Value};

/// Deep-merge `overlay` on top of `base`, returning a new table.
///
/// For each key in `overlay`: when both sides hold tables they are merged
/// recursively, otherwise the overlay value replaces the base value outright
/// (arrays are replaced, not concatenated, and a table may be replaced by a
/// scalar). Keys only present in `base` are kept. Neither input is modified.
#[must_use]
pub fn deep_merge(base: &Table, overlay: &Table) -> Table {
    let mut result = base.clone();
    for (key, value) in overlay {
        let merged = match (result.get(key), value) {
            (Some(Value::Table(existing)), Value::Table(incoming)) => {
                Value::Table(deep_merge(existing, incoming))
            }
            _ => value.clone(),
        };
        result.insert(key.clone(), merged);
    }
    result
}
