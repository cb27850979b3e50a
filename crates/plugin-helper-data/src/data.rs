//! The data accessor contract and its two stores.
//!
//! [`Data`] is the small capability surface the expand and flatten helpers
//! need from a resource store: presence, change detection, and path lookup.
//! [`ResourceData`] stands in for a schema-backed store with prior and
//! current state. [`MapData`] is a plain ordered map used as a flatten sink
//! and for simple inputs.

use indexmap::IndexMap;

use crate::error::Result;
use crate::path;
use crate::value::{Map, Value};

/// Read access to a resource's data, addressed by path.
pub trait Data {
    /// Reports whether the resource is seen for the first time.
    fn is_new_resource(&self) -> bool;

    /// Reports whether the value at `key` differs from prior state.
    fn has_change(&self, key: &str) -> bool;

    /// Returns the old and new value at `key`.
    fn get_change(&self, key: &str) -> (Value, Value);

    /// Returns the value at `key`, or [`Value::Null`] if there is none.
    fn get(&self, key: &str) -> Value;

    /// Returns the value at `key` and whether it is set to a non-null,
    /// non-zero value.
    fn get_ok_exists(&self, key: &str) -> (Value, bool);

    /// The path `key` resolves to in the underlying store.
    fn full_path(&self, key: &str) -> String {
        key.to_owned()
    }
}

/// Write access to a resource's data.
pub trait DataMut: Data {
    fn set(&mut self, key: &str, value: Value) -> Result<()>;
}

impl<T: Data + ?Sized> Data for &T {
    fn is_new_resource(&self) -> bool {
        (**self).is_new_resource()
    }

    fn has_change(&self, key: &str) -> bool {
        (**self).has_change(key)
    }

    fn get_change(&self, key: &str) -> (Value, Value) {
        (**self).get_change(key)
    }

    fn get(&self, key: &str) -> Value {
        (**self).get(key)
    }

    fn get_ok_exists(&self, key: &str) -> (Value, bool) {
        (**self).get_ok_exists(key)
    }

    fn full_path(&self, key: &str) -> String {
        (**self).full_path(key)
    }
}

impl<T: Data + ?Sized> Data for &mut T {
    fn is_new_resource(&self) -> bool {
        (**self).is_new_resource()
    }

    fn has_change(&self, key: &str) -> bool {
        (**self).has_change(key)
    }

    fn get_change(&self, key: &str) -> (Value, Value) {
        (**self).get_change(key)
    }

    fn get(&self, key: &str) -> Value {
        (**self).get(key)
    }

    fn get_ok_exists(&self, key: &str) -> (Value, bool) {
        (**self).get_ok_exists(key)
    }

    fn full_path(&self, key: &str) -> String {
        (**self).full_path(key)
    }
}

impl<T: DataMut + ?Sized> DataMut for &mut T {
    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        (**self).set(key, value)
    }
}

/// A plain ordered map satisfying [`Data`].
///
/// Keys are flat: `"a.0.b"` is one key, not a path. Some information a
/// schema-backed store has is lost here: a map has no prior state, so it is
/// never new and every present key counts as changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapData(Map);

impl MapData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map {
        &self.0
    }

    pub fn into_map(self) -> Map {
        self.0
    }
}

impl Data for MapData {
    fn is_new_resource(&self) -> bool {
        false
    }

    fn has_change(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    fn get_change(&self, key: &str) -> (Value, Value) {
        let value = self.get(key);
        (value.clone(), value)
    }

    fn get(&self, key: &str) -> Value {
        self.0.get(key).cloned().unwrap_or_default()
    }

    fn get_ok_exists(&self, key: &str) -> (Value, bool) {
        match self.0.get(key) {
            Some(value) => (value.clone(), !value.is_zero()),
            None => (Value::Null, false),
        }
    }
}

impl DataMut for MapData {
    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        self.0.insert(key.to_owned(), value);
        Ok(())
    }
}

impl From<Map> for MapData {
    fn from(map: Map) -> Self {
        Self(map)
    }
}

impl From<MapData> for Value {
    fn from(data: MapData) -> Self {
        Value::Map(data.0)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for MapData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect::<IndexMap<_, _>>())
    }
}

/// In-memory resource store with prior and current state.
///
/// Paths are resolved through maps by field name, lists by index and sets by
/// element hash code (see [`crate::path`]). A key has changed when its old
/// and new values differ.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceData {
    prior: Option<Value>,
    current: Value,
}

impl ResourceData {
    /// A resource seen for the first time, with no prior state.
    pub fn new(current: impl Into<Value>) -> Self {
        Self {
            prior: None,
            current: current.into(),
        }
    }

    /// An existing resource moving from `prior` to `current`.
    pub fn existing(prior: impl Into<Value>, current: impl Into<Value>) -> Self {
        Self {
            prior: Some(prior.into()),
            current: current.into(),
        }
    }

    pub fn current(&self) -> &Value {
        &self.current
    }

    pub fn prior(&self) -> Option<&Value> {
        self.prior.as_ref()
    }

    pub fn into_current(self) -> Value {
        self.current
    }

    fn old(&self, key: &str) -> Value {
        self.prior
            .as_ref()
            .and_then(|prior| path::get(prior, &path::parse_path(key)))
            .cloned()
            .unwrap_or_default()
    }
}

impl Data for ResourceData {
    fn is_new_resource(&self) -> bool {
        self.prior.is_none()
    }

    fn has_change(&self, key: &str) -> bool {
        self.old(key) != self.get(key)
    }

    fn get_change(&self, key: &str) -> (Value, Value) {
        (self.old(key), self.get(key))
    }

    fn get(&self, key: &str) -> Value {
        path::get(&self.current, &path::parse_path(key))
            .cloned()
            .unwrap_or_default()
    }

    fn get_ok_exists(&self, key: &str) -> (Value, bool) {
        let value = self.get(key);
        let ok = !value.is_zero();
        (value, ok)
    }
}

impl DataMut for ResourceData {
    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        path::set(&mut self.current, &path::parse_path(key), value)
    }
}
