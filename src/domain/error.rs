//! Domain-level errors (no external dependencies)
//!
//! Parsing and editing never fail on user input. These variants only
//! surface caller mistakes, and are raised before any tree mutation.

use generational_arena::Index;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("node does not belong to this outline: {0:?}")]
    UnknownNode(Index),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
