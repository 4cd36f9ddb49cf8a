use thiserror::Error;

/// Errors produced while parsing object references.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("malformed object path: {0}")]
    MalformedPath(String),

    #[error("unknown hash family: {0}")]
    UnknownFamily(String),

    #[error("invalid hex digest: {0}")]
    InvalidHex(String),

    #[error("invalid digest length for {family}: expected {expected}, got {actual}")]
    InvalidLength {
        family: &'static str,
        expected: usize,
        actual: usize,
    },
}

pub type TypeResult<T> = Result<T, TypeError>;
