//! The change gate every extractor reads through.

use plugin_helper_data::{Data, Value};
use tracing::trace;

/// Read `key` only if it is worth reading.
///
/// A value is available when the resource is new or the key has changed
/// since prior state. Unchanged keys read as absent even when the store holds
/// a value for them, so partial update payloads never re-send untouched
/// fields. Zero values (see [`Value::is_zero`]) are absent too.
pub fn get<D: Data + ?Sized>(d: &D, key: &str) -> Option<Value> {
    if !d.is_new_resource() && !d.has_change(key) {
        trace!(key = %d.full_path(key), "unchanged, skipping");
        return None;
    }
    match d.get_ok_exists(key) {
        (value, true) => Some(value),
        _ => None,
    }
}
