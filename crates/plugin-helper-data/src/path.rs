//! Dot-separated value paths.
//!
//! A path like `"task_spec.0.mounts.1606541327.target"` walks maps by field
//! name, lists by index and sets by element hash code. Segments are joined
//! with a literal `.`; there is no escaping, so a field name containing `.`
//! cannot be addressed.

use crate::error::{Error, Result};
use crate::value::{Map, Value};

pub const SEPARATOR: char = '.';

/// Split a path into its segments. The empty path is the root.
///
/// ```
/// use plugin_helper_data::path::parse_path;
///
/// assert_eq!(parse_path(""), Vec::<&str>::new());
/// assert_eq!(parse_path("list.0.foo"), vec!["list", "0", "foo"]);
/// ```
pub fn parse_path(path: &str) -> Vec<&str> {
    if path.is_empty() {
        return Vec::new();
    }
    path.split(SEPARATOR).collect()
}

pub fn format_path<S: AsRef<str>>(segments: &[S]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(segment.as_ref());
    }
    out
}

/// Append one segment to a prefix.
///
/// ```
/// use plugin_helper_data::path::join;
///
/// assert_eq!(join("list", "0"), "list.0");
/// assert_eq!(join("", "list"), "list");
/// ```
pub fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        return segment.to_owned();
    }
    let mut out = String::with_capacity(prefix.len() + 1 + segment.len());
    out.push_str(prefix);
    out.push(SEPARATOR);
    out.push_str(segment);
    out
}

/// Check if a segment is a canonical non-negative integer.
pub fn is_valid_index(segment: &str) -> bool {
    if segment.is_empty() {
        return false;
    }
    let bytes = segment.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|b| b.is_ascii_digit())
}

fn step<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    match current {
        Value::Map(map) => map.get(segment),
        Value::List(items) if is_valid_index(segment) => items.get(segment.parse::<usize>().ok()?),
        Value::Set(set) => set.get(segment.parse().ok()?),
        _ => None,
    }
}

/// Resolve `segments` against `root`. Missing segments yield `None`.
pub fn get<'a, S: AsRef<str>>(root: &'a Value, segments: &[S]) -> Option<&'a Value> {
    let mut current = root;
    for segment in segments {
        current = step(current, segment.as_ref())?;
    }
    Some(current)
}

/// Write `value` at `segments` below `root`.
///
/// Missing map entries are created as maps on the way down. A list index
/// equal to the list length appends. Set elements cannot be written in place
/// because that would change their hash; replace the whole set instead.
pub fn set<S: AsRef<str>>(root: &mut Value, segments: &[S], value: Value) -> Result<()> {
    let Some((last, parents)) = segments.split_last() else {
        *root = value;
        return Ok(());
    };

    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        let segment = segment.as_ref();
        if current.is_null() {
            *current = Value::Map(Map::new());
        }
        current = match current {
            Value::Map(map) => map.entry(segment.to_owned()).or_default(),
            Value::List(items) => {
                let idx = list_index(segment, items.len(), &segments[..=depth])?;
                if idx == items.len() {
                    items.push(Value::Null);
                }
                &mut items[idx]
            }
            Value::Set(_) => {
                return Err(Error::invalid_path(
                    &format_path(&segments[..=depth]),
                    "set elements cannot be modified in place",
                ))
            }
            _ => {
                return Err(Error::invalid_path(
                    &format_path(&segments[..=depth]),
                    "parent is not a container",
                ))
            }
        };
    }

    let last = last.as_ref();
    if current.is_null() {
        *current = Value::Map(Map::new());
    }
    match current {
        Value::Map(map) => {
            let slot = map.entry(last.to_owned()).or_default();
            *slot = coerce(slot, value);
        }
        Value::List(items) => {
            let idx = list_index(last, items.len(), segments)?;
            if idx == items.len() {
                items.push(value);
            } else {
                items[idx] = coerce(&items[idx], value);
            }
        }
        Value::Set(_) => {
            return Err(Error::invalid_path(
                &format_path(segments),
                "set elements cannot be modified in place",
            ))
        }
        _ => {
            return Err(Error::invalid_path(
                &format_path(segments),
                "parent is not a container",
            ))
        }
    }
    Ok(())
}

fn list_index<S: AsRef<str>>(segment: &str, len: usize, at: &[S]) -> Result<usize> {
    if !is_valid_index(segment) {
        return Err(Error::invalid_path(&format_path(at), "expected a list index"));
    }
    match segment.parse::<usize>() {
        Ok(idx) if idx <= len => Ok(idx),
        _ => Err(Error::invalid_path(&format_path(at), "list index out of range")),
    }
}

/// A list written over an existing set keeps the set's shape and hash function.
fn coerce(existing: &Value, value: Value) -> Value {
    match (existing, value) {
        (Value::Set(set), Value::List(items)) => {
            Value::Set(crate::SchemaSet::from_values(set.hasher(), items))
        }
        (_, value) => value,
    }
}
