use axum::http::header::WWW_AUTHENTICATE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cas_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// Malformed path, unsupported hash family or method.
    #[error("{0}")]
    InvalidRequest(String),

    #[error("authentication required")]
    Unauthorized { realm: String },

    #[error("object not found")]
    NotFound,

    #[error("digest didn't match as declared")]
    DigestMismatch,

    #[error("store error: {0}")]
    Store(StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DigestMismatch { .. } => Self::DigestMismatch,
            StoreError::Unsupported(_) => {
                Self::InvalidRequest("unsupported object hash function".into())
            }
            other => Self::Store(other),
        }
    }
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::DigestMismatch => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Unauthorized { realm } => (
                status,
                [(WWW_AUTHENTICATE, format!("Basic realm=\"{realm}\""))],
                "Authentication required.",
            )
                .into_response(),
            Self::NotFound => (status, "Object not found.").into_response(),
            Self::InvalidRequest(msg) => (status, format!("{msg}\n")).into_response(),
            Self::DigestMismatch => (status, "digest didn't match as declared.\n").into_response(),
            err => {
                tracing::error!(error = %err, "request failed");
                (status, format!("Server error: {err}\n")).into_response()
            }
        }
    }
}
