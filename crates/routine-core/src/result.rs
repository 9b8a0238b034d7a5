//! Result type aliases for the Routine API.

use crate::RoutineError;

/// A specialized `Result` type for Routine operations.
pub type RoutineResult<T> = Result<T, RoutineError>;
