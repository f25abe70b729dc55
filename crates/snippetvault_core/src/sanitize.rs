//! Recursive sanitization of documents bound for the remote store.

use serde_json::{Map, Value};

/// Key stripped from every object level; identity travels out-of-band.
const IDENTITY_KEY: &str = "id";

/// Produce a storage-safe copy of a JSON tree.
///
/// Primitives pass through unchanged. Arrays drop null entries, then
/// sanitize the survivors. Objects drop any key named `id` at every nesting
/// level. The result is always a plain JSON-serializable tree carrying no
/// identity field.
pub fn sanitize(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .filter(|item| !item.is_null())
                .map(sanitize)
                .collect(),
        ),
        Value::Object(fields) => {
            let mut out = Map::with_capacity(fields.len());
            for (key, field) in fields {
                if key == IDENTITY_KEY {
                    continue;
                }
                out.insert(key.clone(), sanitize(field));
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}
