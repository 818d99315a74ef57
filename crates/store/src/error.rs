//! Persistence error model.

use thiserror::Error;

/// Failure talking to or interpreting the state document.
///
/// No variant is retried automatically; every failure surfaces to the user
/// action that triggered it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("state could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("state could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("not a larder state document (kind {found:?})")]
    InvalidKind { found: String },

    /// The document was written by a newer (or unknown) schema.
    #[error("unsupported schema version {0}")]
    UnsupportedVersion(u32),

    #[error("state file is locked by another process")]
    Locked,
}


