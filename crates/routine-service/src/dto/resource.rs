//! Shaped records paired with the id they were projected from.

use routine_core::{shape, FieldSelection, RoutineResult, Shape, ShapedRecord};

/// A shaped record and the identifier of its source.
///
/// The id is kept outside the record because the client may have left
/// `Id` out of `fields`, while links still need it.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedResource<I> {
    pub id: I,
    pub record: ShapedRecord,
}

impl<I> ShapedResource<I> {
    /// Projects `source` down to `fields`.
    pub fn shape<S: Shape>(id: I, source: &S, fields: &FieldSelection) -> RoutineResult<Self> {
        Ok(Self {
            id,
            record: shape(source, fields)?,
        })
    }
}
