//! Errors shared by the domain crates.

use thiserror::Error;

use crate::id::LineItemId;

/// Shorthand result for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Error raised by domain operations.
///
/// Keep this focused on deterministic domain failures (validation, bounds,
/// malformed records). Storage concerns live in `larder-store`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// User-supplied input failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A persisted numeric field could not be parsed as a finite number.
    #[error("malformed record: field `{field}` has unparseable value {value:?}")]
    MalformedRecord { field: &'static str, value: String },

    /// Positional access beyond the end of a sequence.
    #[error("position {index} is out of range (length {len})")]
    OutOfRange { index: usize, len: usize },

    /// An id-addressed line item does not exist.
    #[error("no line item with id {0}")]
    UnknownItem(LineItemId),

    /// An identifier failed to parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn malformed(field: &'static str, value: impl Into<String>) -> Self {
        Self::MalformedRecord {
            field,
            value: value.into(),
        }
    }

    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }

    pub fn unknown_item(id: LineItemId) -> Self {
        Self::UnknownItem(id)
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}


