use cas_types::HashFamily;

/// Errors from digest computation.
#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    /// No hasher is registered for the family.
    #[error("unsupported hash family: {0}")]
    Unsupported(HashFamily),

    /// Reading the content failed part-way.
    #[error("I/O error while hashing: {0}")]
    Io(#[from] std::io::Error),
}

pub type DigestResult<T> = Result<T, DigestError>;
