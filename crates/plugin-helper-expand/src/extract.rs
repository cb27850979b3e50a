//! Typed readers over the change gate.
//!
//! Each scalar reader comes in two flavours: one returning the type's zero
//! value when the key is absent, and an `_opt` one returning `None`, for
//! optional fields of API request bodies. A value of the wrong type is an
//! error carrying the full path.

use indexmap::IndexMap;
use plugin_helper_data::{path, Data, Map, Result, Value};

use crate::gate::get;

macro_rules! scalar {
    ($(#[$doc:meta])* $name:ident, $opt:ident, $ty:ty, $conv:ident) => {
        $(#[$doc])*
        pub fn $name<D: Data + ?Sized>(d: &D, key: &str) -> Result<$ty> {
            Ok($opt(d, key)?.unwrap_or_default())
        }

        $(#[$doc])*
        ///
        /// Returns `None` when the key is absent or unchanged.
        pub fn $opt<D: Data + ?Sized>(d: &D, key: &str) -> Result<Option<$ty>> {
            get(d, key)
                .map(|value| value.$conv().map_err(|e| e.at(d.full_path(key))))
                .transpose()
        }
    };
}

scalar!(
    /// Reads a string.
    string, string_opt, String, into_string
);
scalar!(
    /// Reads an integer.
    int, int_opt, i64, as_int
);
scalar!(
    /// Reads a float.
    float, float_opt, f64, as_float
);
scalar!(
    /// Reads a boolean.
    bool, bool_opt, bool, as_bool
);

/// Reads a map field, or an empty map when absent.
pub fn map<D: Data + ?Sized>(d: &D, key: &str) -> Result<Map> {
    match get(d, key) {
        Some(value) => value.into_map().map_err(|e| e.at(d.full_path(key))),
        None => Ok(Map::new()),
    }
}

/// Reads a map field whose values are all strings.
pub fn string_map<D: Data + ?Sized>(d: &D, key: &str) -> Result<IndexMap<String, String>> {
    map(d, key)?
        .into_iter()
        .map(|(k, v)| {
            let s = v
                .into_string()
                .map_err(|e| e.at(path::join(&d.full_path(key), &k)))?;
            Ok((k, s))
        })
        .collect()
}

/// Reads a list field as raw values, or an empty list when absent.
pub fn slice<D: Data + ?Sized>(d: &D, key: &str) -> Result<Vec<Value>> {
    match get(d, key) {
        Some(value) => value.into_list().map_err(|e| e.at(d.full_path(key))),
        None => Ok(Vec::new()),
    }
}
