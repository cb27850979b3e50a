//! plugin-helper: move values between resource data and API objects.
//!
//! Re-exports the workspace crates under one roof:
//!
//! - the value tree, stores and scoped accessors ([`plugin_helper_data`]),
//! - [`expand`]: change-gated readers from resource data into native values,
//! - [`flatten`]: writers from native values into resource data.

pub use plugin_helper_data::{
    data, hash, hash_value, path, scoped, set, value, Data, DataMut, Error, HashFn, Map, MapData,
    ResourceData, Result, SchemaSet, Scoped, Value,
};
pub use plugin_helper_expand as expand;
pub use plugin_helper_flatten as flatten;
