use std::sync::Arc;

use cas_store::BlobStore;

use crate::auth::Authorizer;
use crate::config::ServerConfig;

/// Shared, read-only state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub store: Arc<dyn BlobStore>,
    pub authorizer: Arc<dyn Authorizer>,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        store: Arc<dyn BlobStore>,
        authorizer: Arc<dyn Authorizer>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            authorizer,
        }
    }
}
