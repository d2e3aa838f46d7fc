//! TikTok provider adapter
//!
//! Posts the share URL to a configured JSON provider and accepts the first of
//! `video`, `download` or `url` from the response.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::config::TikTokProviderConfig;
use crate::domain::media::{MediaItem, MediaKind, MediaResolver};
use crate::domain::DomainError;

pub struct TikTokResolver {
    client: reqwest::Client,
    config: Option<TikTokProviderConfig>,
}

impl TikTokResolver {
    pub fn new(client: reqwest::Client, config: Option<TikTokProviderConfig>) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl MediaResolver for TikTokResolver {
    async fn resolve(&self, target: &str) -> Result<Vec<MediaItem>, DomainError> {
        let config = self.config.as_ref().ok_or(DomainError::NotConfigured)?;

        let response = self
            .client
            .post(&config.url)
            .header("accept", "*/*")
            .header("origin", &config.origin)
            .header("referer", &config.referer)
            .json(&json!({ "url": target }))
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("tiktok provider request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::upstream(format!(
                "tiktok provider returned {}",
                response.status()
            )));
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| DomainError::upstream(format!("tiktok provider sent invalid JSON: {e}")))?;

        let download = ["video", "download", "url"]
            .iter()
            .find_map(|field| data.get(*field).and_then(|value| value.as_str()))
            .filter(|url| !url.is_empty());

        match download {
            Some(url) => {
                debug!("TikTok provider returned a download URL");
                Ok(vec![MediaItem::new(url).with_kind(MediaKind::Video)])
            }
            None => Err(DomainError::NoMediaFound),
        }
    }
}
