//! Prefix-scoped accessors.

use tracing::trace;

use crate::data::{Data, DataMut};
use crate::error::Result;
use crate::path;
use crate::value::Value;

/// A view of a store rooted at a path prefix.
///
/// Every operation on `Scoped` is the same operation on the inner store at
/// `prefix + "." + key`. Scopes nest: a scope over a scope resolves keys
/// through both prefixes, so scoping by `"a"`, then `0`, then `"b"` reads
/// exactly what `"a.0.b"` reads.
///
/// The operation
///
/// ```text
/// d.get("foo.0.bar")
/// ```
///
/// can be expressed as
///
/// ```
/// # use plugin_helper_data::{Data, MapData, Scoped, Value};
/// # let mut d = MapData::new();
/// # d.insert("foo.0.bar", "baz");
/// let foo = Scoped::at_key(&d, "foo");
/// let item = Scoped::at_index(&foo, 0);
/// assert_eq!(item.get("bar"), Value::from("baz"));
/// ```
#[derive(Debug, Clone)]
pub struct Scoped<D> {
    prefix: String,
    inner: D,
}

impl<D: Data> Scoped<D> {
    pub fn at_key(inner: D, key: &str) -> Self {
        trace!(prefix = %inner.full_path(key), "scope");
        Self {
            prefix: key.to_owned(),
            inner,
        }
    }

    pub fn at_index(inner: D, index: usize) -> Self {
        Self::at_key(inner, &index.to_string())
    }

    /// The segment this scope adds to its inner store's keys.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn into_inner(self) -> D {
        self.inner
    }

    fn key(&self, key: &str) -> String {
        path::join(&self.prefix, key)
    }
}

impl<D: Data> Data for Scoped<D> {
    fn is_new_resource(&self) -> bool {
        self.inner.is_new_resource()
    }

    fn has_change(&self, key: &str) -> bool {
        self.inner.has_change(&self.key(key))
    }

    fn get_change(&self, key: &str) -> (Value, Value) {
        self.inner.get_change(&self.key(key))
    }

    fn get(&self, key: &str) -> Value {
        self.inner.get(&self.key(key))
    }

    fn get_ok_exists(&self, key: &str) -> (Value, bool) {
        self.inner.get_ok_exists(&self.key(key))
    }

    fn full_path(&self, key: &str) -> String {
        self.inner.full_path(&self.key(key))
    }
}

impl<D: DataMut> DataMut for Scoped<D> {
    fn set(&mut self, key: &str, value: Value) -> Result<()> {
        let key = self.key(key);
        self.inner.set(&key, value)
    }
}
