use std::sync::Arc;

use cas_store::{BlobStore, FsBlobStore};
use tokio::net::TcpListener;

use crate::auth::{Authorizer, DenyAllAuthorizer};
use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Blob store daemon.
pub struct CasServer {
    state: AppState,
}

impl CasServer {
    /// A server over a filesystem store at `config.storage_root` that denies
    /// all writes.
    pub fn new(config: ServerConfig) -> Self {
        let store = Arc::new(FsBlobStore::new(config.storage_root.clone()));
        Self::with_parts(config, store, Arc::new(DenyAllAuthorizer))
    }

    pub fn with_parts(
        config: ServerConfig,
        store: Arc<dyn BlobStore>,
        authorizer: Arc<dyn Authorizer>,
    ) -> Self {
        Self {
            state: AppState::new(config, store, authorizer),
        }
    }

    /// Replace the authorizer.
    pub fn with_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.state.authorizer = authorizer;
        self
    }

    pub fn config(&self) -> &ServerConfig {
        &self.state.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let addr = self.state.config.bind_addr;
        let app = build_router(self.state);
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("casd listening on http://{}/", listener.local_addr()?);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
