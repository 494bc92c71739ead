//! Domain-level errors

use thiserror::Error;

use crate::value_objects::PipelineState;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A write-once field of a conversation turn was written twice
    #[error("Turn field already set: {0}")]
    FieldAlreadySet(&'static str),

    /// The pipeline was asked to move between two states that are not connected
    #[error("Invalid pipeline transition: {from} -> {to}")]
    InvalidTransition {
        from: PipelineState,
        to: PipelineState,
    },

    /// A provider name that is not part of the catalog
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
