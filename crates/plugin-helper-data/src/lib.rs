//! plugin-helper-data: the dynamic side of the plugin helpers.
//!
//! Provides the value tree resource data is stored in, the path addressing
//! used to reach nested values, content-hashed sets, and the [`Data`]
//! accessor contract the expand and flatten helpers are written against.
//!
//! # Example
//!
//! ```
//! use plugin_helper_data::{Data, ResourceData, Scoped, Value};
//! use serde_json::json;
//!
//! let d = ResourceData::new(Value::from(json!({"list": [{"foo": "bar"}]})));
//! let item = Scoped::at_index(Scoped::at_key(&d, "list"), 0);
//! assert_eq!(item.get("foo"), Value::from("bar"));
//! ```

pub mod data;
pub mod error;
pub mod hash;
pub mod path;
pub mod scoped;
pub mod set;
pub mod value;

pub use data::{Data, DataMut, MapData, ResourceData};
pub use error::{Error, Result};
pub use hash::hash_value;
pub use scoped::Scoped;
pub use set::{HashFn, SchemaSet};
pub use value::{Map, Value};
