//! plugin-helper-flatten: write API objects back into resource data.
//!
//! Nested records are stored as lists of maps: a single optional record is a
//! list capped at one item, a repeated record is one map per element. The
//! helpers here hand a fresh [`MapData`] sink to user code and wrap whatever
//! it writes into that shape.
//!
//! # Example
//!
//! ```
//! use plugin_helper_data::Value;
//! use plugin_helper_flatten::{flatten_func, flatten_list_func};
//! use serde_json::json;
//!
//! struct Mount { target: &'static str }
//! let mounts = [Mount { target: "/a" }, Mount { target: "/b" }];
//!
//! let task = flatten_func(|d| {
//!     d.insert("mounts", flatten_list_func(&mounts, |m, d| d.insert("target", m.target)));
//! });
//!
//! assert_eq!(
//!     task,
//!     Value::from(json!([{"mounts": [{"target": "/a"}, {"target": "/b"}]}]))
//! );
//! ```

use plugin_helper_data::{Error, HashFn, MapData, Result, SchemaSet, Value};
use tracing::debug;

/// Writes a value into a sink.
pub trait Flattener {
    fn flatten(&self, d: &mut MapData);
}

/// Adapter to use an ordinary function as a [`Flattener`].
#[derive(Debug, Clone, Copy)]
pub struct FlattenerFn<F>(pub F);

impl<F: Fn(&mut MapData)> Flattener for FlattenerFn<F> {
    fn flatten(&self, d: &mut MapData) {
        (self.0)(d)
    }
}

impl<T: Flattener + ?Sized> Flattener for &T {
    fn flatten(&self, d: &mut MapData) {
        (**self).flatten(d)
    }
}

impl<T: Flattener + ?Sized> Flattener for Box<T> {
    fn flatten(&self, d: &mut MapData) {
        (**self).flatten(d)
    }
}

/// A collection flattened element by element.
pub trait FlattenList {
    /// Number of elements in the collection.
    fn len(&self) -> usize;

    /// Flattens the element at index `i` into `d`.
    fn flatten(&self, i: usize, d: &mut MapData);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Flattener> FlattenList for [T] {
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn flatten(&self, i: usize, d: &mut MapData) {
        self[i].flatten(d)
    }
}

impl<T: Flattener> FlattenList for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn flatten(&self, i: usize, d: &mut MapData) {
        self[i].flatten(d)
    }
}

/// Flattens a single record into a one-element list.
pub fn flatten<F: Flattener + ?Sized>(f: &F) -> Value {
    let mut d = MapData::new();
    f.flatten(&mut d);
    Value::List(vec![d.into()])
}

/// Like [`flatten`], for a closure.
pub fn flatten_func<F: FnOnce(&mut MapData)>(f: F) -> Value {
    let mut d = MapData::new();
    f(&mut d);
    Value::List(vec![d.into()])
}

/// Flattens each element of `l` into its own map, preserving order.
pub fn flatten_list<L: FlattenList + ?Sized>(l: &L) -> Value {
    let mut out = Vec::with_capacity(l.len());
    for i in 0..l.len() {
        let mut d = MapData::new();
        l.flatten(i, &mut d);
        out.push(d.into());
    }
    debug!(elements = out.len(), "flattened list");
    Value::List(out)
}

/// Flattens each item with `f`, preserving order.
pub fn flatten_list_func<T, F>(items: &[T], mut f: F) -> Value
where
    F: FnMut(&T, &mut MapData),
{
    let out: Vec<Value> = items
        .iter()
        .map(|item| {
            let mut d = MapData::new();
            f(item, &mut d);
            d.into()
        })
        .collect();
    debug!(elements = out.len(), "flattened list");
    Value::List(out)
}

/// Flattens each element of a dynamic list or set with `f`.
///
/// `Null` flattens to an empty list. Any other non-sequence is a shape
/// violation.
pub fn flatten_values<F>(value: &Value, mut f: F) -> Result<Value>
where
    F: FnMut(&Value, &mut MapData),
{
    let items = match value {
        Value::Null => return Ok(Value::List(Vec::new())),
        Value::List(items) => items.as_slice(),
        Value::Set(set) => set.list(),
        other => return Err(Error::NotASequence { found: other.kind() }),
    };
    Ok(flatten_list_func(items, |item, d| f(item, d)))
}

/// Converts a flattened list into a set keyed by `hasher`, for set-typed
/// fields.
pub fn into_set(value: Value, hasher: HashFn) -> Result<Value> {
    match value {
        Value::List(items) => Ok(Value::Set(SchemaSet::from_values(hasher, items))),
        Value::Set(set) => Ok(Value::Set(SchemaSet::from_values(hasher, set.into_values()))),
        other => Err(Error::NotASequence { found: other.kind() }),
    }
}
