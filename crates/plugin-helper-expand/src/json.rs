use plugin_helper_data::{Data, Result};
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::extract::string_opt;

/// Reads a string field holding a JSON object and parses it.
///
/// Unlike the other readers this one can fail on well-typed input: the
/// string may not be valid JSON, or may not be an object. Absent fields parse
/// to an empty map, so callers who want a default on error can use
/// `unwrap_or_default()`.
pub fn json<D: Data + ?Sized>(d: &D, key: &str) -> Result<Map<String, JsonValue>> {
    let Some(text) = string_opt(d, key)? else {
        return Ok(Map::new());
    };
    serde_json::from_str(&text).map_err(|err| {
        debug!(key = %d.full_path(key), %err, "malformed JSON");
        err.into()
    })
}
