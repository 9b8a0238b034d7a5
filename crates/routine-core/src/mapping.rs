//! Property mapping registry.
//!
//! A [`PropertyMapping`] translates the field names a client sees on a DTO
//! into the storage columns of the entity behind it. Tables are
//! hand-authored, registered once at startup in a [`PropertyMappingRegistry`]
//! and only read afterwards.

use crate::{RoutineError, RoutineResult};
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Storage side of one mapping entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMappingValue {
    target_columns: Vec<&'static str>,
    invert_direction: bool,
}

impl PropertyMappingValue {
    /// Storage columns in the order they are applied.
    #[must_use]
    pub fn target_columns(&self) -> &[&'static str] {
        &self.target_columns
    }

    /// Whether the stored value runs opposite to the exposed one.
    #[must_use]
    pub const fn invert_direction(&self) -> bool {
        self.invert_direction
    }
}

/// One exposed field and its storage columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMappingEntry {
    exposed_name: &'static str,
    value: PropertyMappingValue,
}

impl PropertyMappingEntry {
    /// The field name clients use.
    #[must_use]
    pub const fn exposed_name(&self) -> &'static str {
        self.exposed_name
    }

    /// The storage side of the entry.
    #[must_use]
    pub const fn value(&self) -> &PropertyMappingValue {
        &self.value
    }
}

/// Mapping table for one DTO and entity pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMapping {
    entries: Vec<PropertyMappingEntry>,
}

impl PropertyMapping {
    /// Starts a new mapping table.
    #[must_use]
    pub fn builder() -> PropertyMappingBuilder {
        PropertyMappingBuilder::default()
    }

    /// Looks up an exposed field name, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, exposed_name: &str) -> Option<&PropertyMappingValue> {
        let exposed_name = exposed_name.trim();
        self.entries
            .iter()
            .find(|entry| entry.exposed_name.eq_ignore_ascii_case(exposed_name))
            .map(|entry| &entry.value)
    }

    /// Returns true if the field name is mapped.
    #[must_use]
    pub fn contains(&self, exposed_name: &str) -> bool {
        self.get(exposed_name).is_some()
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = &PropertyMappingEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder for [`PropertyMapping`] tables.
#[derive(Debug, Default)]
pub struct PropertyMappingBuilder {
    entries: Vec<PropertyMappingEntry>,
}

impl PropertyMappingBuilder {
    /// Maps an exposed field onto one or more columns.
    #[must_use]
    pub fn map<I>(self, exposed_name: &'static str, columns: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        self.entry(exposed_name, columns, false)
    }

    /// Maps an exposed field whose sort direction runs against its columns.
    #[must_use]
    pub fn map_inverted<I>(self, exposed_name: &'static str, columns: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        self.entry(exposed_name, columns, true)
    }

    fn entry<I>(mut self, exposed_name: &'static str, columns: I, invert_direction: bool) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        self.entries.push(PropertyMappingEntry {
            exposed_name,
            value: PropertyMappingValue {
                target_columns: columns.into_iter().collect(),
                invert_direction,
            },
        });
        self
    }

    /// Validates and freezes the table.
    ///
    /// Rejects duplicate exposed names, entries without columns, column names
    /// that are not plain SQL identifiers and tables without an `Id` entry.
    pub fn build(self) -> RoutineResult<PropertyMapping> {
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.exposed_name.trim().is_empty() {
                return Err(RoutineError::configuration("mapping entry with an empty name"));
            }
            if self.entries[..index]
                .iter()
                .any(|other| other.exposed_name.eq_ignore_ascii_case(entry.exposed_name))
            {
                return Err(RoutineError::configuration(format!(
                    "duplicate mapping entry '{}'",
                    entry.exposed_name
                )));
            }
            if entry.value.target_columns.is_empty() {
                return Err(RoutineError::configuration(format!(
                    "mapping entry '{}' has no target columns",
                    entry.exposed_name
                )));
            }
            if let Some(column) = entry
                .value
                .target_columns
                .iter()
                .find(|column| !is_sql_identifier(column))
            {
                return Err(RoutineError::configuration(format!(
                    "mapping entry '{}' targets invalid column '{}'",
                    entry.exposed_name, column
                )));
            }
        }

        if !self
            .entries
            .iter()
            .any(|entry| entry.exposed_name.eq_ignore_ascii_case("Id"))
        {
            return Err(RoutineError::configuration("mapping table has no 'Id' entry"));
        }

        Ok(PropertyMapping {
            entries: self.entries,
        })
    }
}

/// Column names end up in SQL text, so only `[A-Za-z_][A-Za-z0-9_]*` passes.
fn is_sql_identifier(column: &str) -> bool {
    let mut chars = column.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[derive(Clone)]
struct Registration {
    source: &'static str,
    destination: &'static str,
    mapping: Arc<PropertyMapping>,
}

/// Registry of mapping tables keyed by (DTO, entity) type pair.
#[derive(Clone, Default)]
pub struct PropertyMappingRegistry {
    mappings: HashMap<(TypeId, TypeId), Registration>,
}

impl PropertyMappingRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the table for `Source` (DTO) onto `Destination` (entity).
    pub fn register<Source: 'static, Destination: 'static>(
        &mut self,
        mapping: PropertyMapping,
    ) -> RoutineResult<()> {
        let key = (TypeId::of::<Source>(), TypeId::of::<Destination>());
        if self.mappings.contains_key(&key) {
            return Err(RoutineError::configuration(format!(
                "mapping from {} to {} registered twice",
                type_name::<Source>(),
                type_name::<Destination>()
            )));
        }
        self.mappings.insert(
            key,
            Registration {
                source: type_name::<Source>(),
                destination: type_name::<Destination>(),
                mapping: Arc::new(mapping),
            },
        );
        Ok(())
    }

    /// Looks up the table for `Source` onto `Destination`.
    pub fn get_mapping<Source: 'static, Destination: 'static>(
        &self,
    ) -> RoutineResult<Arc<PropertyMapping>> {
        self.mappings
            .get(&(TypeId::of::<Source>(), TypeId::of::<Destination>()))
            .map(|registration| Arc::clone(&registration.mapping))
            .ok_or_else(|| {
                RoutineError::configuration(format!(
                    "cannot find property mapping from {} to {}",
                    type_name::<Source>(),
                    type_name::<Destination>()
                ))
            })
    }

    /// Returns true if every clause of `order_by` names a mapped field.
    ///
    /// Fails only when no table is registered for the pair.
    pub fn valid_mapping_exists_for<Source: 'static, Destination: 'static>(
        &self,
        order_by: &str,
    ) -> RoutineResult<bool> {
        let mapping = self.get_mapping::<Source, Destination>()?;
        Ok(crate::sorting::parse_order_by(order_by)
            .iter()
            .all(|clause| mapping.contains(&clause.field)))
    }

    /// Number of registered tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Returns true if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

impl fmt::Debug for PropertyMappingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<String> = self
            .mappings
            .values()
            .map(|r| format!("{} -> {}", r.source, r.destination))
            .collect();
        pairs.sort();
        f.debug_struct("PropertyMappingRegistry")
            .field("mappings", &pairs)
            .finish()
    }
}
