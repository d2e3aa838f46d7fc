//! Streaming media relay
//!
//! Fetches a decoded upstream URL and hands the response body back as a
//! bounded-chunk byte stream. Single attempt, no retry: the caller is an
//! interactive media load, so failing fast beats queueing.

use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use futures::{Stream, StreamExt, TryStreamExt};
use reqwest::header::CONTENT_TYPE;

use crate::domain::DomainError;

/// Relayed response body.
pub type RelayStream = Pin<Box<dyn Stream<Item = Result<Bytes, DomainError>> + Send>>;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A successfully opened upstream body, ready to forward.
pub struct RelayedMedia {
    pub content_type: String,
    pub stream: RelayStream,
}

pub struct MediaRelay {
    client: reqwest::Client,
}

impl MediaRelay {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// Open the upstream URL and return its content type plus body stream.
    ///
    /// The body is never buffered whole; chunks flow through as the upstream
    /// produces them. Transport errors, timeouts and non-success statuses all
    /// surface as `UpstreamUnavailable`.
    pub async fn stream(&self, url: &str) -> Result<RelayedMedia, DomainError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::upstream(format!("relay request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(DomainError::upstream(format!(
                "upstream returned {}",
                response.status()
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let stream = response
            .bytes_stream()
            .map_err(|e| DomainError::upstream(format!("relay stream failed: {e}")))
            .boxed();

        Ok(RelayedMedia {
            content_type,
            stream,
        })
    }
}
