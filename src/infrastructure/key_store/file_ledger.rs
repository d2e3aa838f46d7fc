//! Durable usage ledger backed by a JSON side-file
//!
//! For multi-process deployments where each request may land in a different
//! process. Every check is a read-modify-write of the whole file under a
//! process-level mutex; the mutex is the critical section the window contract
//! requires, and it is released on all exit paths. There is no cross-process
//! lock - concurrent writers from separate processes may lose occasional
//! updates, which keeps the limiter best-effort by design.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use super::ledger::{admit_into, UsageLedger};

/// File shape: `{ "<key>": { "<ip>": [epoch_seconds, ...] } }`.
type UsageMap = HashMap<String, HashMap<String, Vec<u64>>>;

#[derive(Debug)]
pub struct FileUsageLedger {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileUsageLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// A missing or corrupt file degrades to an empty map; limiting restarts
    /// from zero rather than blocking traffic.
    async fn read_usage(&self) -> UsageMap {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "Usage file corrupt, resetting");
                UsageMap::new()
            }),
            Err(_) => UsageMap::new(),
        }
    }

    async fn write_usage(&self, usage: &UsageMap) {
        let contents = match serde_json::to_string(usage) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(error = %e, "Failed to serialize usage ledger");
                return;
            }
        };

        if let Err(e) = tokio::fs::write(&self.path, contents).await {
            warn!(path = %self.path.display(), error = %e, "Failed to persist usage ledger");
        }
    }
}

#[async_trait]
impl UsageLedger for FileUsageLedger {
    async fn admit(
        &self,
        key: &str,
        ip: &str,
        now: u64,
        window_seconds: u64,
        max_requests: u32,
    ) -> bool {
        let _guard = self.lock.lock().await;

        let mut usage = self.read_usage().await;
        let stamps = usage
            .entry(key.to_string())
            .or_default()
            .entry(ip.to_string())
            .or_default();

        let admitted = admit_into(stamps, now, window_seconds, max_requests);

        // Persist even on rejection so the purge keeps the file bounded.
        self.write_usage(&usage).await;

        admitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_ledger() -> (tempfile::TempDir, FileUsageLedger) {
        let dir = tempfile::tempdir().unwrap();
        let ledger = FileUsageLedger::new(dir.path().join("ip_usage.json"));
        (dir, ledger)
    }

    #[tokio::test]
    async fn test_admits_until_cap_and_persists() {
        let (dir, ledger) = temp_ledger();

        assert!(ledger.admit("K", "1.2.3.4", 100, 60, 2).await);
        assert!(ledger.admit("K", "1.2.3.4", 101, 60, 2).await);
        assert!(!ledger.admit("K", "1.2.3.4", 102, 60, 2).await);

        // A fresh ledger over the same file sees the recorded usage.
        let reopened = FileUsageLedger::new(dir.path().join("ip_usage.json"));
        assert!(!reopened.admit("K", "1.2.3.4", 103, 60, 2).await);
    }

    #[tokio::test]
    async fn test_window_slides_across_reopen() {
        let (dir, ledger) = temp_ledger();

        assert!(ledger.admit("K", "ip", 100, 60, 1).await);

        let reopened = FileUsageLedger::new(dir.path().join("ip_usage.json"));
        assert!(!reopened.admit("K", "ip", 130, 60, 1).await);
        assert!(reopened.admit("K", "ip", 161, 60, 1).await);
    }

    #[tokio::test]
    async fn test_missing_file_starts_empty() {
        let (_dir, ledger) = temp_ledger();
        assert!(ledger.admit("K", "ip", 100, 60, 1).await);
    }

    #[tokio::test]
    async fn test_corrupt_file_resets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ip_usage.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let ledger = FileUsageLedger::new(&path);
        assert!(ledger.admit("K", "ip", 100, 60, 1).await);
    }

    #[tokio::test]
    async fn test_concurrent_admissions_do_not_overshoot() {
        let (_dir, ledger) = temp_ledger();
        let ledger = std::sync::Arc::new(ledger);

        let mut handles = Vec::new();
        for _ in 0..10 {
            let ledger = ledger.clone();
            handles.push(tokio::spawn(async move {
                ledger.admit("K", "ip", 100, 60, 3).await
            }));
        }

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() {
                admitted += 1;
            }
        }

        assert_eq!(admitted, 3);
    }
}
