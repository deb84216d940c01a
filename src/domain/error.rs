//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Precondition violations of a tree build.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("cannot build a decision tree from an empty entity set")]
    EmptyEntitySet,

    #[error("entity name is not unique: {0}")]
    DuplicateName(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
