//! Service layer implementations.
//!
//! Trait definitions live in the parent crate (`company_service.rs`,
//! `employee_service.rs`). This module contains the concrete components.

pub mod company_service_impl;
pub mod employee_service_impl;

pub use company_service_impl::{CompanyServiceImpl, CompanyServiceImplParameters};
pub use employee_service_impl::{EmployeeServiceImpl, EmployeeServiceImplParameters};

use routine_core::{
    apply_sort, FieldSelection, Ordering, PropertyMappingRegistry, RoutineResult, Shape,
};
use tracing::warn;

/// Resolves a client `orderBy` through the registered `Dto` to `E` table.
///
/// The mandatory `Id` entry is appended last so equal keys still come back
/// in a stable order across pages.
pub(crate) fn ordering_for<Dto: 'static, E: 'static>(
    mappings: &PropertyMappingRegistry,
    order_by: &str,
) -> RoutineResult<Ordering> {
    let mapping = mappings.get_mapping::<Dto, E>()?;
    let ordering = apply_sort(Ordering::new(), order_by, &mapping).map_err(|e| {
        warn!("Rejected orderBy '{}': {}", order_by, e);
        e
    })?;
    apply_sort(ordering, "Id", &mapping)
}

/// Parses and checks a `fields` parameter against the fields `S` declares.
pub(crate) fn selection_for<S: Shape>(fields: Option<&str>) -> RoutineResult<FieldSelection> {
    let selection = FieldSelection::parse(fields);
    selection.validate_for::<S>().map_err(|e| {
        warn!("Rejected fields '{}': {}", fields.unwrap_or_default(), e);
        e
    })?;
    Ok(selection)
}
