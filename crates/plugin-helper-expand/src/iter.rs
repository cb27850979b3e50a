//! Iteration over list and set fields.

use plugin_helper_data::{Data, Result, SchemaSet, Scoped, Value};

use crate::gate::get;

/// Access to the elements of a list or set field.
///
/// An iterator built for an absent field (unchanged, missing or zero)
/// behaves as an empty collection.
pub trait Elements<'a, D: Data + ?Sized + 'a> {
    /// The elements as the store holds them.
    fn list(&self) -> &[Value];

    fn len(&self) -> usize {
        self.list().len()
    }

    fn is_empty(&self) -> bool {
        self.list().is_empty()
    }

    /// Calls `f` with each element and its position.
    fn range<F>(&self, mut f: F)
    where
        F: FnMut(usize, &Value),
    {
        for (i, value) in self.list().iter().enumerate() {
            f(i, value);
        }
    }

    /// Calls `f` with an accessor rooted at each element, making nested
    /// access read like flat access:
    ///
    /// ```
    /// # use plugin_helper_data::{ResourceData, Value};
    /// # use plugin_helper_expand::{list, string, Elements};
    /// # use serde_json::json;
    /// # let d = ResourceData::new(Value::from(json!({"foo": [{"bar": "baz"}]})));
    /// let mut bars = Vec::new();
    /// list(&d, "foo")?.elem(|d| {
    ///     bars.push(string(d, "bar")?);
    ///     Ok(())
    /// })?;
    /// assert_eq!(bars, ["baz"]);
    /// # Ok::<(), plugin_helper_data::Error>(())
    /// ```
    ///
    /// The first error returned by `f` stops the iteration.
    fn elem<F>(&self, f: F) -> Result<()>
    where
        F: FnMut(&Scoped<&Scoped<&'a D>>) -> Result<()>;
}

/// Elements of a list field, addressed by position.
#[derive(Debug)]
pub struct ListIter<'a, D: ?Sized> {
    scope: Scoped<&'a D>,
    values: Vec<Value>,
}

impl<'a, D: Data + ?Sized + 'a> Elements<'a, D> for ListIter<'a, D> {
    fn list(&self) -> &[Value] {
        &self.values
    }

    fn elem<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(&Scoped<&Scoped<&'a D>>) -> Result<()>,
    {
        for idx in 0..self.values.len() {
            f(&Scoped::at_index(&self.scope, idx))?;
        }
        Ok(())
    }
}

/// Elements of a set field, addressed by content hash.
#[derive(Debug)]
pub struct SetIter<'a, D: ?Sized> {
    scope: Scoped<&'a D>,
    set: SchemaSet,
}

impl<'a, D: ?Sized> SetIter<'a, D> {
    /// The underlying set.
    pub fn set(&self) -> &SchemaSet {
        &self.set
    }
}

impl<'a, D: Data + ?Sized + 'a> Elements<'a, D> for SetIter<'a, D> {
    fn list(&self) -> &[Value] {
        self.set.list()
    }

    fn elem<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(&Scoped<&Scoped<&'a D>>) -> Result<()>,
    {
        for code in self.set.codes() {
            f(&Scoped::at_key(&self.scope, &code.to_string()))?;
        }
        Ok(())
    }
}

/// Reads a list field and returns an iterator over its elements.
pub fn list<'a, D: Data + ?Sized>(d: &'a D, key: &str) -> Result<ListIter<'a, D>> {
    let values = match get(d, key) {
        Some(value) => value.into_list().map_err(|e| e.at(d.full_path(key)))?,
        None => Vec::new(),
    };
    Ok(ListIter {
        scope: Scoped::at_key(d, key),
        values,
    })
}

/// Reads a set field and returns an iterator over its elements.
pub fn set<'a, D: Data + ?Sized>(d: &'a D, key: &str) -> Result<SetIter<'a, D>> {
    let set = match get(d, key) {
        Some(value) => value.into_set().map_err(|e| e.at(d.full_path(key)))?,
        None => SchemaSet::default(),
    };
    Ok(SetIter {
        scope: Scoped::at_key(d, key),
        set,
    })
}
