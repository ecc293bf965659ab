//! Batched RPC envelope used by Dokploy's `/api/trpc/*?batch=1` routes.
//!
//! Requests are sent as `{"0": {"json": <payload>}}` and answers come back as
//! `[{"result": {"data": {"json": <value>}}}]`.
use serde_json::{Value, json};

/// Wrap a single payload as batch entry `0`.
#[must_use]
pub fn wrap_batch(payload: Value) -> Value {
    json!({ "0": { "json": payload } })
}

/// Extract the value of the first batch result.
///
/// Tries `result.data.json`, then `result.data`, then returns the entry
/// itself. A non-array response is treated as a single entry; an empty array
/// yields `null`.
#[must_use]
pub fn unwrap_result(response: Value) -> Value {
    let mut entry = match response {
        Value::Array(items) => items.into_iter().next().unwrap_or(Value::Null),
        other => other,
    };

    if let Some(value) = entry.pointer_mut("/result/data/json") {
        return value.take();
    }
    if let Some(data) = entry.pointer_mut("/result/data") {
        return data.take();
    }
    entry
}
