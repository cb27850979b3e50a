//! Added/removed partitioning of set fields.

use plugin_helper_data::{Data, Error, Result, SchemaSet, Value};
use tracing::debug;

use crate::iter::{set, Elements};

/// What changed in a set field: elements to add and elements to remove.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetDiff {
    pub added: Vec<Value>,
    pub removed: Vec<Value>,
}

impl SetDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Compares a set field against prior state.
///
/// For a new resource every element is added. For a changed key, added is
/// `new - old` and removed is `old - new`, compared by element hash. An
/// unchanged key yields an empty diff, which is not the same as everything
/// removed.
pub fn diff<D: Data + ?Sized>(d: &D, key: &str) -> Result<SetDiff> {
    if d.is_new_resource() {
        let added = set(d, key)?.list().to_vec();
        debug!(key = %d.full_path(key), added = added.len(), "set diff (new resource)");
        return Ok(SetDiff {
            added,
            removed: Vec::new(),
        });
    }
    if !d.has_change(key) {
        return Ok(SetDiff::default());
    }

    let (old, new) = d.get_change(key);
    let old = as_set(old).map_err(|e| e.at(d.full_path(key)))?;
    let new = as_set(new).map_err(|e| e.at(d.full_path(key)))?;
    let out = match (old, new) {
        (Some(old), Some(new)) => SetDiff {
            added: new.difference(&old).into_values(),
            removed: old.difference(&new).into_values(),
        },
        (None, Some(new)) => SetDiff {
            added: new.into_values(),
            removed: Vec::new(),
        },
        (Some(old), None) => SetDiff {
            added: Vec::new(),
            removed: old.into_values(),
        },
        (None, None) => SetDiff::default(),
    };
    debug!(
        key = %d.full_path(key),
        added = out.added.len(),
        removed = out.removed.len(),
        "set diff"
    );
    Ok(out)
}

fn as_set(value: Value) -> Result<Option<SchemaSet>> {
    match value {
        Value::Null => Ok(None),
        Value::Set(set) => Ok(Some(set)),
        other => Err(Error::TypeMismatch {
            path: String::new(),
            expected: "set",
            found: other.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugin_helper_data::{hash_value, Map, ResourceData};
    use serde_json::json;

    fn rec(name: &str) -> Value {
        Value::from(json!({ "name": name }))
    }

    fn state(items: Vec<Value>) -> Map {
        let mut m = Map::new();
        m.insert("set".into(), Value::Set(SchemaSet::from_values(hash_value, items)));
        m
    }

    #[test]
    fn changed_set_partitions_by_hash() {
        let d = ResourceData::existing(
            state(vec![rec("A"), rec("B")]),
            state(vec![rec("B"), rec("C")]),
        );
        let out = diff(&d, "set").unwrap();
        assert_eq!(out.added, vec![rec("C")]);
        assert_eq!(out.removed, vec![rec("A")]);
    }

    #[test]
    fn new_resource_adds_everything() {
        let d = ResourceData::new(state(vec![rec("A"), rec("B")]));
        let out = diff(&d, "set").unwrap();
        assert_eq!(out.added.len(), 2);
        assert!(out.removed.is_empty());
    }

    #[test]
    fn unchanged_set_is_empty_diff() {
        let s = state(vec![rec("A")]);
        let d = ResourceData::existing(s.clone(), s);
        assert!(diff(&d, "set").unwrap().is_empty());
    }

    #[test]
    fn missing_side_is_empty_set() {
        let d = ResourceData::existing(Map::new(), state(vec![rec("A")]));
        assert_eq!(diff(&d, "set").unwrap().added, vec![rec("A")]);

        let d = ResourceData::existing(state(vec![rec("A")]), Map::new());
        assert_eq!(diff(&d, "set").unwrap().removed, vec![rec("A")]);
    }

    #[test]
    fn non_set_is_type_mismatch() {
        let d = ResourceData::existing(
            Value::from(json!({"set": ["a"]})),
            Value::from(json!({"set": ["b"]})),
        );
        assert!(matches!(
            diff(&d, "set").unwrap_err(),
            Error::TypeMismatch { ref path, expected: "set", found: "list" } if path == "set"
        ));
    }
}
