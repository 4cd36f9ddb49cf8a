use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Process-wide configuration. Built once at startup and never mutated.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory under which all blobs are stored. Must already exist.
    pub storage_root: PathBuf,
    /// Realm advertised in `WWW-Authenticate` challenges.
    pub realm: String,
    /// Secret handed to the authorizer.
    pub shared_secret: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3179)),
            storage_root: PathBuf::from("/tmp/casroot"),
            realm: "casd".into(),
            shared_secret: String::new(),
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Refuse configurations the server cannot start with: an empty shared
    /// secret, or a storage root that is missing or not a directory.
    pub fn validate(&self) -> ServerResult<()> {
        if self.shared_secret.is_empty() {
            return Err(ServerError::Config("no shared secret configured".into()));
        }
        match std::fs::metadata(&self.storage_root) {
            Ok(meta) if meta.is_dir() => Ok(()),
            _ => Err(ServerError::Config(format!(
                "storage root '{}' doesn't exist or is not a directory",
                self.storage_root.display()
            ))),
        }
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("storage_root", &self.storage_root)
            .field("realm", &self.realm)
            .field("shared_secret", &"<redacted>")
            .finish()
    }
}
