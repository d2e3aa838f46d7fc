//! Sliding-window usage ledger
//!
//! Tracks request timestamps per (key, client-IP) pair. A check purges
//! entries older than the window, admits if the remaining count is under the
//! cap, and records the admission - all in one critical section so two
//! concurrent requests cannot both observe the same stale count.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Storage strategy for usage windows.
///
/// Implementations are best-effort limiters, not security controls; an
/// internal failure degrades to admission rather than rejecting traffic.
#[async_trait]
pub trait UsageLedger: Send + Sync {
    /// Purge stale entries for `(key, ip)`, then admit and record the request
    /// if the in-window count is below `max_requests`.
    async fn admit(
        &self,
        key: &str,
        ip: &str,
        now: u64,
        window_seconds: u64,
        max_requests: u32,
    ) -> bool;
}

/// Purge-then-admit against one window vector. Shared by both ledger
/// backends so the window semantics cannot drift apart.
pub(crate) fn admit_into(
    stamps: &mut Vec<u64>,
    now: u64,
    window_seconds: u64,
    max_requests: u32,
) -> bool {
    stamps.retain(|ts| now.saturating_sub(*ts) < window_seconds);

    if stamps.len() >= max_requests as usize {
        return false;
    }

    stamps.push(now);
    true
}

/// In-memory ledger, scoped to the process lifetime.
///
/// The default backend for single-process deployments; state is lost on
/// restart.
#[derive(Debug, Default)]
pub struct InMemoryUsageLedger {
    windows: RwLock<HashMap<(String, String), Vec<u64>>>,
}

impl InMemoryUsageLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UsageLedger for InMemoryUsageLedger {
    async fn admit(
        &self,
        key: &str,
        ip: &str,
        now: u64,
        window_seconds: u64,
        max_requests: u32,
    ) -> bool {
        let mut windows = self.windows.write().await;
        let stamps = windows
            .entry((key.to_string(), ip.to_string()))
            .or_default();

        admit_into(stamps, now, window_seconds, max_requests)
    }
}
