//! Dynamic sorting driven by a client `orderBy` string.
//!
//! `orderBy` is a comma separated list of `field[ asc|desc]` clauses. Every
//! field is resolved through a [`PropertyMapping`] before anything is
//! applied, so one unknown field rejects the whole request.

use crate::{PropertyMapping, RoutineError, RoutineResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn invert(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// One parsed `orderBy` clause in exposed terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderClause {
    /// Exposed field name, trimmed.
    pub field: String,
    /// Requested direction.
    pub direction: SortDirection,
}

/// Parses an `orderBy` string into clauses.
///
/// Empty clauses are skipped. The field is the text before the first space.
/// A clause ending in ` desc` (any case) sorts descending; anything else
/// after the field is ignored.
pub fn parse_order_by(order_by: &str) -> Vec<OrderClause> {
    order_by
        .split(',')
        .map(str::trim)
        .filter(|clause| !clause.is_empty())
        .map(|clause| {
            let (field, rest) = clause
                .split_once(char::is_whitespace)
                .unwrap_or((clause, ""));
            let descending = !rest.is_empty()
                && rest
                    .rsplit(char::is_whitespace)
                    .next()
                    .is_some_and(|word| word.eq_ignore_ascii_case("desc"));
            OrderClause {
                field: field.to_string(),
                direction: if descending {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                },
            }
        })
        .collect()
}

/// One storage-level sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    /// Storage column.
    pub column: &'static str,
    /// Direction applied to the column.
    pub direction: SortDirection,
}

/// Anything a sort key can be appended to.
///
/// Keys are appended in priority order: the first call is the primary key,
/// later calls break ties.
pub trait SortTarget: Sized {
    /// Appends one sort key.
    #[must_use]
    fn then_order_by(self, column: &'static str, direction: SortDirection) -> Self;
}

/// Deferred ordering description, rendered by the storage layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ordering {
    keys: Vec<SortKey>,
}

impl Ordering {
    /// Creates an empty ordering.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys in priority order.
    #[must_use]
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Returns true if no key has been applied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Renders the keys as an `ORDER BY` list, e.g. `name ASC, id ASC`.
    #[must_use]
    pub fn to_sql(&self) -> String {
        self.keys
            .iter()
            .map(|key| format!("{} {}", key.column, key.direction))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl SortTarget for Ordering {
    fn then_order_by(mut self, column: &'static str, direction: SortDirection) -> Self {
        self.keys.push(SortKey { column, direction });
        self
    }
}

/// Resolves `order_by` through `mapping` and appends the result to `query`.
///
/// Multi-column entries contribute every column in declared order with the
/// same direction; inverted entries flip it. A blank `order_by` leaves the
/// query untouched. No tie-breaker is added here.
pub fn apply_sort<Q: SortTarget>(
    query: Q,
    order_by: &str,
    mapping: &PropertyMapping,
) -> RoutineResult<Q> {
    let clauses = parse_order_by(order_by);

    let mut keys = Vec::with_capacity(clauses.len());
    for clause in &clauses {
        let value = mapping.get(&clause.field).ok_or_else(|| {
            RoutineError::invalid_query(format!("unknown sort field '{}'", clause.field))
        })?;
        let direction = if value.invert_direction() {
            clause.direction.invert()
        } else {
            clause.direction
        };
        keys.extend(
            value
                .target_columns()
                .iter()
                .map(|&column| SortKey { column, direction }),
        );
    }

    Ok(keys
        .into_iter()
        .fold(query, |query, key| query.then_order_by(key.column, key.direction)))
}
