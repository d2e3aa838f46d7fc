//! Mediagate
//!
//! A keyed media gateway: flat-file API-key validation with sliding-window
//! rate limiting, provider resolvers behind a collaborator trait, and an
//! opaque-token relay that streams upstream media without exposing its URL.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use api::state::AppState;
use config::LedgerBackend;
use domain::clock::SystemClock;
use domain::media::MediaResolver;
use infrastructure::key_store::{
    loader, FileUsageLedger, InMemoryUsageLedger, KeyStore, UsageLedger,
};
use infrastructure::media_proxy::MediaRelay;
use infrastructure::resolvers::{TeraboxResolver, TikTokResolver};

/// Build the application state from configuration.
///
/// This is the composition root: the registry and master set are loaded here,
/// once, and every service is constructed explicitly and handed to handlers
/// through `AppState` - no import-time globals, no hidden initialization
/// order.
pub fn create_app_state(config: &AppConfig) -> AppState {
    let registry = loader::load_registry(&config.keys.key_file);
    let master_keys = loader::load_master_keys(&config.keys.master_key_file);
    info!(
        keys = registry.len(),
        master_keys = master_keys.len(),
        "Key registry loaded"
    );

    let ledger: Arc<dyn UsageLedger> = match config.rate_limit.backend {
        LedgerBackend::Memory => Arc::new(InMemoryUsageLedger::new()),
        LedgerBackend::File => {
            info!(path = %config.rate_limit.usage_file.display(), "Using file-backed usage ledger");
            Arc::new(FileUsageLedger::new(&config.rate_limit.usage_file))
        }
    };

    let key_store = Arc::new(KeyStore::new(
        registry,
        master_keys,
        ledger,
        Arc::new(SystemClock),
        config.rate_limit.window_seconds,
        config.rate_limit.max_requests,
    ));

    let fetch_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.proxy.fetch_timeout_seconds))
        .build()
        .expect("Failed to build HTTP client");

    let mut resolvers: HashMap<String, Arc<dyn MediaResolver>> = HashMap::new();
    resolvers.insert(
        "tiktok".to_string(),
        Arc::new(TikTokResolver::new(
            fetch_client.clone(),
            config.providers.tiktok.clone(),
        )),
    );
    resolvers.insert(
        "terabox".to_string(),
        Arc::new(TeraboxResolver::new(
            fetch_client,
            config.providers.terabox.clone(),
        )),
    );

    let relay = Arc::new(MediaRelay::new(Duration::from_secs(
        config.proxy.relay_timeout_seconds,
    )));

    AppState::new(key_store, relay, resolvers, config.response.owner.clone())
}
