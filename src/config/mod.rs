//! Application configuration

pub mod app_config;

pub use app_config::{
    AppConfig, KeysConfig, LedgerBackend, LogFormat, LoggingConfig, ProvidersConfig, ProxyConfig,
    RateLimitConfig, ResponseConfig, ServerConfig, TeraboxProviderConfig, TikTokProviderConfig,
};
