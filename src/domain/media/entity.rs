//! Media items produced by provider resolvers

use serde::Serialize;

/// Coarse media classification, used for the `type` field in responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Image,
    File,
}

impl MediaKind {
    /// Classify by URL extension when the provider does not say.
    pub fn from_url(url: &str) -> Self {
        let lower = url.to_lowercase();
        if lower.contains(".mp4") || lower.contains(".webm") || lower.contains(".mov") {
            Self::Video
        } else if lower.contains(".jpg")
            || lower.contains(".jpeg")
            || lower.contains(".png")
            || lower.contains(".webp")
        {
            Self::Image
        } else {
            Self::File
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Image => "image",
            Self::File => "file",
        }
    }
}

/// One upstream media URL discovered by a resolver.
///
/// The `url` here is the true upstream locator; it never reaches the client
/// directly - handlers wrap it into an opaque proxy token first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    pub url: String,
    pub kind: MediaKind,
    /// Optional display name (e.g. a file name from a listing).
    pub label: Option<String>,
}

impl MediaItem {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let kind = MediaKind::from_url(&url);
        Self {
            url,
            kind,
            label: None,
        }
    }

    pub fn with_kind(mut self, kind: MediaKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
