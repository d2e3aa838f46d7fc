//! Terabox provider adapter
//!
//! Queries a configured JSON provider for a share URL and reads the `list`
//! array of files; each entry contributes its download link.

use async_trait::async_trait;
use tracing::debug;

use crate::config::TeraboxProviderConfig;
use crate::domain::media::{MediaItem, MediaKind, MediaResolver};
use crate::domain::DomainError;

pub struct TeraboxResolver {
    client: reqwest::Client,
    config: Option<TeraboxProviderConfig>,
}

impl TeraboxResolver {
    pub fn new(client: reqwest::Client, config: Option<TeraboxProviderConfig>) -> Self {
        Self { client, config }
    }
}

fn item_from_entry(entry: &serde_json::Value) -> Option<MediaItem> {
    let url = entry.get("download_link").and_then(|v| v.as_str())?;
    if url.is_empty() {
        return None;
    }

    let mut item = MediaItem::new(url);

    if let Some(kind) = entry.get("type").and_then(|v| v.as_str()) {
        item = match kind {
            "video" => item.with_kind(MediaKind::Video),
            "image" => item.with_kind(MediaKind::Image),
            _ => item,
        };
    }

    if let Some(name) = entry.get("name").and_then(|v| v.as_str()) {
        item = item.with_label(name);
    }

    Some(item)
}

#[async_trait]
impl MediaResolver for TeraboxResolver {
    async fn resolve(&self, target: &str) -> Result<Vec<MediaItem>, DomainError> {
        let config = self.config.as_ref().ok_or(DomainError::NotConfigured)?;

        let response = self
            .client
            .get(&config.url)
            .query(&[("url", target)])
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("terabox provider request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::upstream(format!(
                "terabox provider returned {}",
                response.status()
            )));
        }

        let data: serde_json::Value = response.json().await.map_err(|e| {
            DomainError::upstream(format!("terabox provider sent invalid JSON: {e}"))
        })?;

        let files = data
            .get("list")
            .and_then(|v| v.as_array())
            .ok_or(DomainError::NoMediaFound)?;

        let items: Vec<MediaItem> = files.iter().filter_map(item_from_entry).collect();
        if items.is_empty() {
            return Err(DomainError::NoMediaFound);
        }

        debug!(files = items.len(), "Terabox provider returned a file listing");
        Ok(items)
    }
}
