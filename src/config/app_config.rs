use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub keys: KeysConfig,
    pub rate_limit: RateLimitConfig,
    pub proxy: ProxyConfig,
    pub providers: ProvidersConfig,
    pub response: ResponseConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Key registry sources
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    pub key_file: PathBuf,
    pub master_key_file: PathBuf,
}

/// Sliding-window rate limiting
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Trailing window length in seconds.
    pub window_seconds: u64,
    /// Default request cap per (key, IP) within the window; a numeric cap in
    /// the key file overrides it per key.
    pub max_requests: u32,
    pub backend: LedgerBackend,
    /// Side-file path, only used by the `file` backend.
    pub usage_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LedgerBackend {
    /// Process-lifetime map; the default for single-process deployments.
    #[default]
    Memory,
    /// Durable JSON side-file for multi-process deployments.
    File,
}

/// Outbound fetch timeouts
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Provider resolver fetches.
    pub fetch_timeout_seconds: u64,
    /// Media relay fetches.
    pub relay_timeout_seconds: u64,
}

/// Upstream provider endpoints; a missing section leaves the provider
/// registered but answering `Api not configured`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub tiktok: Option<TikTokProviderConfig>,
    pub terabox: Option<TeraboxProviderConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TikTokProviderConfig {
    pub url: String,
    pub origin: String,
    pub referer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeraboxProviderConfig {
    pub url: String,
}

/// Response envelope attribution
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResponseConfig {
    pub owner: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            key_file: PathBuf::from("keys.txt"),
            master_key_file: PathBuf::from("masterkeys.txt"),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_seconds: 60,
            max_requests: 20,
            backend: LedgerBackend::default(),
            usage_file: PathBuf::from("ip_usage.json"),
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_seconds: 20,
            relay_timeout_seconds: 30,
        }
    }
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            owner: "@mediagate".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
