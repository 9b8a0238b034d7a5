//! Data shaping: projecting a DTO down to a client-selected set of fields.
//!
//! Each shapeable type declares its exposed fields once, as a static ordered
//! table of name/accessor pairs. Output records always follow that
//! declaration order, whatever order the client asked for.

use crate::{FieldSelection, RoutineError, RoutineResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One exposed field of a shape.
pub struct ShapeField<T> {
    /// Exposed field name.
    pub name: &'static str,
    /// Reads the field value off a source object.
    pub accessor: fn(&T) -> Value,
}

impl<T> ShapeField<T> {
    /// Declares a field.
    #[must_use]
    pub const fn new(name: &'static str, accessor: fn(&T) -> Value) -> Self {
        Self { name, accessor }
    }
}

impl<T> fmt::Debug for ShapeField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeField")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A type that can be projected field by field.
pub trait Shape: Sized + 'static {
    /// Exposed fields in declaration order.
    fn fields() -> &'static [ShapeField<Self>];

    /// Looks up a declared field, ignoring ASCII case.
    fn field(name: &str) -> Option<&'static ShapeField<Self>> {
        let name = name.trim();
        Self::fields()
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
    }
}

/// An ordered field name to value record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapedRecord(Map<String, Value>);

impl ShapedRecord {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends or replaces a value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the record is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwraps the underlying JSON map.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<ShapedRecord> for Value {
    fn from(record: ShapedRecord) -> Self {
        Value::Object(record.0)
    }
}

/// Projects one object onto the selected fields.
///
/// Fails only when the selection names a field `S` does not declare.
pub fn shape<S: Shape>(source: &S, fields: &FieldSelection) -> RoutineResult<ShapedRecord> {
    if let Some(unknown) = fields.names().find(|name| S::field(name).is_none()) {
        return Err(RoutineError::invalid_query(format!(
            "field '{}' does not exist on the resource",
            unknown
        )));
    }

    let mut record = ShapedRecord::new();
    for field in S::fields() {
        if fields.includes(field.name) {
            record.insert(field.name, (field.accessor)(source));
        }
    }
    Ok(record)
}

/// Projects every object of a sequence onto the selected fields.
pub fn shape_all<'a, S, I>(sources: I, fields: &FieldSelection) -> RoutineResult<Vec<ShapedRecord>>
where
    S: Shape,
    I: IntoIterator<Item = &'a S>,
{
    sources
        .into_iter()
        .map(|source| shape(source, fields))
        .collect()
}
