//! plugin-helper-expand: map resource configuration onto API objects.
//!
//! Every reader goes through a change gate: values are only returned when the
//! resource is new or the key changed since prior state, which keeps partial
//! update payloads minimal. Lists and sets hand each element to a callback as
//! a [`Scoped`](plugin_helper_data::Scoped) accessor, so nested records are
//! read with the same helpers as top-level fields.
//!
//! # Example
//!
//! ```
//! use plugin_helper_data::{ResourceData, Value};
//! use plugin_helper_expand::{bool_opt, list, string, Elements};
//! use serde_json::json;
//!
//! let d = ResourceData::new(Value::from(json!({
//!     "name": "web",
//!     "ports": [{"target": 80}, {"target": 443}],
//! })));
//!
//! assert_eq!(string(&d, "name")?, "web");
//! assert_eq!(bool_opt(&d, "detached")?, None);
//!
//! let mut targets = Vec::new();
//! list(&d, "ports")?.elem(|d| {
//!     targets.push(plugin_helper_expand::int(d, "target")?);
//!     Ok(())
//! })?;
//! assert_eq!(targets, [80, 443]);
//! # Ok::<(), plugin_helper_data::Error>(())
//! ```

pub mod diff;
pub mod extract;
pub mod gate;
pub mod iter;
pub mod json;

pub use diff::{diff, SetDiff};
pub use extract::{
    bool, bool_opt, float, float_opt, int, int_opt, map, slice, string, string_map, string_opt,
};
pub use gate::get;
pub use iter::{list, set, Elements, ListIter, SetIter};
pub use json::json;
