//! Error types for the export service.

use mapping_framework::MappingError;
use thiserror::Error;

/// Errors that can occur while wiring or running exports.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SampleError {
    /// A mapping failed to build at startup.
    #[error("Mapping configuration error: {0}")]
    Configuration(#[from] MappingError),

    /// No mapping is registered for the requested type pair.
    #[error("No mapping registered from {source_type} to {destination_type}")]
    MissingMapping {
        source_type: &'static str,
        destination_type: &'static str,
    },
}
