//! Field selection parsing and validation for the `fields` query parameter.

use crate::{RoutineError, RoutineResult, Shape};

/// A parsed `fields` parameter.
///
/// An empty selection means every field of the shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSelection {
    names: Vec<String>,
}

impl FieldSelection {
    /// Selects every field.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Parses a comma separated field list.
    ///
    /// Tokens are trimmed and blank tokens are skipped, so `None`, `""` and
    /// `" , "` all select every field.
    #[must_use]
    pub fn parse(fields: Option<&str>) -> Self {
        let names = fields
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        Self { names }
    }

    /// Returns true if every field is selected.
    #[must_use]
    pub fn is_all(&self) -> bool {
        self.names.is_empty()
    }

    /// Requested names as given, trimmed.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Returns true if `name` is part of the selection, ignoring ASCII case.
    #[must_use]
    pub fn includes(&self, name: &str) -> bool {
        self.is_all() || self.names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    /// Checks every requested name against the fields `S` declares.
    pub fn validate_for<S: Shape>(&self) -> RoutineResult<()> {
        match self.names().find(|name| S::field(name).is_none()) {
            Some(unknown) => Err(RoutineError::invalid_query(format!(
                "unknown field '{}' requested",
                unknown
            ))),
            None => Ok(()),
        }
    }
}

/// Returns true if every name in `fields` is a declared field of `S`.
///
/// Blank input is valid and means every field.
#[must_use]
pub fn has_properties<S: Shape>(fields: Option<&str>) -> bool {
    FieldSelection::parse(fields).validate_for::<S>().is_ok()
}
