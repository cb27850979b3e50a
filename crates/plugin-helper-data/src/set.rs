//! Content-hashed sets.
//!
//! A [`SchemaSet`] addresses its elements by the absolute value of a hash over
//! each element's whole content. The hash function travels with the set, so
//! every lookup against the same set (old or new state) agrees on keys.

use std::fmt;

use crate::hash::hash_value;
use crate::value::Value;

/// Hash function of a set. Negative outputs are folded by absolute value.
pub type HashFn = fn(&Value) -> i32;

/// Hash-keyed collection of [`Value`]s.
///
/// Elements are kept in ascending code order, which is the fixed traversal
/// order exposed by [`SchemaSet::list`]. Inserting an element whose code is
/// already present replaces the existing element.
#[derive(Clone)]
pub struct SchemaSet {
    hasher: HashFn,
    codes: Vec<u32>,
    values: Vec<Value>,
}

impl SchemaSet {
    pub fn new(hasher: HashFn) -> Self {
        Self {
            hasher,
            codes: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn from_values(hasher: HashFn, values: impl IntoIterator<Item = Value>) -> Self {
        let mut set = Self::new(hasher);
        for value in values {
            set.insert(value);
        }
        set
    }

    pub fn hasher(&self) -> HashFn {
        self.hasher
    }

    /// Absolute hash code of `value` under this set's hash function.
    pub fn code(&self, value: &Value) -> u32 {
        (self.hasher)(value).unsigned_abs()
    }

    /// Path segment addressing `value`: its code in decimal.
    pub fn hash_key(&self, value: &Value) -> String {
        self.code(value).to_string()
    }

    pub fn insert(&mut self, value: Value) {
        let code = self.code(&value);
        match self.codes.binary_search(&code) {
            Ok(idx) => self.values[idx] = value,
            Err(idx) => {
                self.codes.insert(idx, code);
                self.values.insert(idx, value);
            }
        }
    }

    pub fn remove(&mut self, value: &Value) -> Option<Value> {
        let code = self.code(value);
        let idx = self.codes.binary_search(&code).ok()?;
        self.codes.remove(idx);
        Some(self.values.remove(idx))
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.contains_code(self.code(value))
    }

    pub fn contains_code(&self, code: u32) -> bool {
        self.codes.binary_search(&code).is_ok()
    }

    /// Element stored under `code`.
    pub fn get(&self, code: u32) -> Option<&Value> {
        let idx = self.codes.binary_search(&code).ok()?;
        self.values.get(idx)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Elements in traversal order.
    pub fn list(&self) -> &[Value] {
        &self.values
    }

    /// Codes in traversal order, parallel to [`SchemaSet::list`].
    pub fn codes(&self) -> &[u32] {
        &self.codes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Elements of `self` whose code is absent from `other`.
    pub fn difference(&self, other: &SchemaSet) -> SchemaSet {
        self.filter(|code| !other.contains_code(code))
    }

    /// Elements of `self` whose code is present in `other`.
    pub fn intersection(&self, other: &SchemaSet) -> SchemaSet {
        self.filter(|code| other.contains_code(code))
    }

    /// All elements of both sets, rehashed with `self`'s hash function.
    pub fn union(&self, other: &SchemaSet) -> SchemaSet {
        let mut out = self.clone();
        for value in other.iter() {
            if !out.contains(value) {
                out.insert(value.clone());
            }
        }
        out
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    fn filter(&self, keep: impl Fn(u32) -> bool) -> SchemaSet {
        let mut out = SchemaSet::new(self.hasher);
        for (code, value) in self.codes.iter().zip(&self.values) {
            if keep(*code) {
                out.codes.push(*code);
                out.values.push(value.clone());
            }
        }
        out
    }
}

impl Default for SchemaSet {
    fn default() -> Self {
        Self::new(hash_value)
    }
}

impl PartialEq for SchemaSet {
    fn eq(&self, other: &Self) -> bool {
        self.codes == other.codes && self.values == other.values
    }
}

impl fmt::Debug for SchemaSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.codes.iter().zip(&self.values))
            .finish()
    }
}

impl<'a> IntoIterator for &'a SchemaSet {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl FromIterator<Value> for SchemaSet {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_values(hash_value, iter)
    }
}
