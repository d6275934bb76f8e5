//! # Mapping Errors
//!
//! Every failure in this crate is a *configuration* error: it is raised while a
//! [`MappingDefinition`](crate::MappingDefinition) is being built, never while a
//! [`CompiledMapping`](crate::CompiledMapping) is applied. Callers are expected to
//! surface these at startup, the same way a bad route table or a missing config
//! key would be surfaced.

use thiserror::Error;

/// Errors raised while building a mapping.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MappingError {
    /// The destination selector is not a direct field read (or a single
    /// conversion wrapping one).
    #[error("The accessor expression is not supported: {expression}")]
    UnsupportedAccessorExpression { expression: String },

    /// The destination field already has a mapping.
    #[error("The field {field} has already been mapped")]
    DuplicateMapping { field: String },

    /// The destination type has no field with the selected name.
    #[error("A destination field with the name {field} was not found on type {destination}")]
    UnknownDestinationField { field: String, destination: String },

    /// A value of the source type cannot be assigned to the destination field.
    #[error("{destination_field} is not assignable from {source_field} ({destination_type} <- {source_type})")]
    IncompatibleFieldTypes {
        source_field: String,
        source_type: String,
        destination_field: String,
        destination_type: String,
    },

    /// One or more destination fields have no mapping.
    #[error("Unmapped fields: {}", .fields.join(", "))]
    UnmappedFields { fields: Vec<String> },
}

/// Convenience alias used throughout the builder API.
pub type Result<T> = std::result::Result<T, MappingError>;
