//! Provider resolver seam
//!
//! Everything provider-specific (endpoints, request shapes, response parsing)
//! lives behind this trait. The gateway only sees a target string going in and
//! a list of upstream media URLs coming out.

use async_trait::async_trait;

use super::MediaItem;
use crate::domain::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaResolver: Send + Sync {
    /// Fetch media for the given target (a share URL, username, etc.).
    ///
    /// Returns `NotConfigured` when the provider endpoint is missing from the
    /// environment, `NoMediaFound` when the upstream responded without usable
    /// media, and `UpstreamUnavailable` for transport failures or non-success
    /// statuses.
    async fn resolve(&self, target: &str) -> Result<Vec<MediaItem>, DomainError>;
}
