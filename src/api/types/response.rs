//! Success response envelopes

use serde::Serialize;

use crate::domain::media::MediaItem;
use crate::domain::proxy::token;

/// One wrapped media entry in a fetch response.
#[derive(Debug, Clone, Serialize)]
pub struct MediaLink {
    pub index: usize,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Same-origin proxy link; the upstream URL stays hidden inside the token.
    pub download_url: String,
}

/// Fetch response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct MediaResponse {
    pub status: &'static str,
    pub total_media: usize,
    pub media: Vec<MediaLink>,
    pub owner: String,
}

impl MediaResponse {
    /// Wrap resolver output into same-origin download links:
    /// `https://<host>/api/<provider>?link=<token>`.
    pub fn build(items: &[MediaItem], host: &str, provider: &str, owner: &str) -> Self {
        let media: Vec<MediaLink> = items
            .iter()
            .enumerate()
            .map(|(i, item)| MediaLink {
                index: i + 1,
                kind: item.kind.as_str(),
                name: item.label.clone(),
                download_url: format!(
                    "https://{host}/api/{provider}?link={}",
                    token::encode(&item.url)
                ),
            })
            .collect();

        Self {
            status: "success",
            total_media: media.len(),
            media,
            owner: owner.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::MediaKind;

    #[test]
    fn test_build_wraps_urls_into_tokens() {
        let items = vec![
            MediaItem::new("https://cdn.example.com/a.mp4"),
            MediaItem::new("https://cdn.example.com/b.jpg").with_label("cover"),
        ];

        let response = MediaResponse::build(&items, "gw.example.com", "tiktok", "@owner");

        assert_eq!(response.status, "success");
        assert_eq!(response.total_media, 2);
        assert_eq!(response.owner, "@owner");

        let first = &response.media[0];
        assert_eq!(first.index, 1);
        assert_eq!(first.kind, "video");
        assert!(first
            .download_url
            .starts_with("https://gw.example.com/api/tiktok?link="));
        // The upstream URL never appears in clear text.
        assert!(!first.download_url.contains("cdn.example.com"));

        let token_value = first.download_url.split("link=").nth(1).unwrap();
        assert_eq!(
            token::decode(token_value).unwrap(),
            "https://cdn.example.com/a.mp4"
        );
    }

    #[test]
    fn test_build_carries_labels_and_kinds() {
        let items = vec![MediaItem::new("https://dl.example.com/x.bin")
            .with_kind(MediaKind::File)
            .with_label("backup.bin")];

        let response = MediaResponse::build(&items, "h", "terabox", "@o");

        assert_eq!(response.media[0].kind, "file");
        assert_eq!(response.media[0].name.as_deref(), Some("backup.bin"));
    }

    #[test]
    fn test_envelope_serialization() {
        let response = MediaResponse::build(
            &[MediaItem::new("https://cdn.example.com/a.mp4")],
            "h.example",
            "tiktok",
            "@o",
        );
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains("\"status\":\"success\""));
        assert!(json.contains("\"total_media\":1"));
        assert!(json.contains("\"type\":\"video\""));
        // No label set, so the field is omitted entirely.
        assert!(!json.contains("\"name\""));
    }
}
