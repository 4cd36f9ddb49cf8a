use async_trait::async_trait;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Credentials presented with a request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// `Authorization: Basic base64(username:password)`.
    Basic { username: String, password: String },
    /// An `Authorization` header was present but could not be decoded.
    Malformed,
    /// No `Authorization` header.
    Anonymous,
}

impl Credentials {
    /// Extract credentials from request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        match headers.get(AUTHORIZATION) {
            None => Self::Anonymous,
            Some(value) => value
                .to_str()
                .ok()
                .and_then(Self::parse_basic)
                .unwrap_or(Self::Malformed),
        }
    }

    fn parse_basic(value: &str) -> Option<Self> {
        let encoded = value.strip_prefix("Basic ")?.trim();
        let decoded = STANDARD.decode(encoded).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;
        Some(Self::Basic {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::Malformed => f.write_str("Malformed"),
            Self::Anonymous => f.write_str("Anonymous"),
        }
    }
}

/// Decides whether a request may write to the store.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn allow(&self, credentials: &Credentials) -> bool;
}

/// Authorizer that refuses every write.
///
/// Incomplete: credential verification against the shared secret is not
/// implemented yet, so every PUT is answered with a 401 challenge. Substitute
/// another [`Authorizer`] to accept writes.
pub struct DenyAllAuthorizer;

#[async_trait]
impl Authorizer for DenyAllAuthorizer {
    async fn allow(&self, credentials: &Credentials) -> bool {
        tracing::debug!(?credentials, "write denied");
        false
    }
}
