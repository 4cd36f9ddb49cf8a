use std::path::PathBuf;

use cas_crypto::DigestError;
use cas_types::{HashFamily, ObjectRef};

/// Errors from blob store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No hasher is available for the reference's family.
    #[error("unsupported hash family: {0}")]
    Unsupported(HashFamily),

    /// Uploaded content does not hash to the declared name.
    #[error("digest mismatch for {oref}: computed {computed}")]
    DigestMismatch { oref: ObjectRef, computed: String },

    /// Renaming the verified staging file onto the final path failed.
    /// The staging file is kept at `staged`.
    #[error("failed to commit {staged} to {target}: {source}")]
    Commit {
        staged: PathBuf,
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// After commit, the final path is not a regular file of the staged size.
    #[error("committed blob {path} is inconsistent: expected {expected} bytes, found {actual} (regular file: {regular})")]
    SizeMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
        regular: bool,
    },

    /// Hashing the staged content failed.
    #[error("digest error: {0}")]
    Digest(#[from] DigestError),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
