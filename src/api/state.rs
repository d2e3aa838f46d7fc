//! Application state for shared services

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::media::MediaResolver;
use crate::infrastructure::key_store::KeyStore;
use crate::infrastructure::media_proxy::MediaRelay;

/// Shared services, constructed once by the composition root and cloned into
/// every handler.
#[derive(Clone)]
pub struct AppState {
    pub key_store: Arc<KeyStore>,
    pub relay: Arc<MediaRelay>,
    /// Provider name (URL path segment) to resolver.
    pub resolvers: Arc<HashMap<String, Arc<dyn MediaResolver>>>,
    /// Attribution string echoed in success envelopes.
    pub owner: String,
}

impl AppState {
    pub fn new(
        key_store: Arc<KeyStore>,
        relay: Arc<MediaRelay>,
        resolvers: HashMap<String, Arc<dyn MediaResolver>>,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            key_store,
            relay,
            resolvers: Arc::new(resolvers),
            owner: owner.into(),
        }
    }
}
