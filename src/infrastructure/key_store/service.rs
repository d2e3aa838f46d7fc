//! Key validation service
//!
//! Owns the loaded registry and master set for the process lifetime and runs
//! the full admission sequence: master bypass, registry lookup, expiry, then
//! rate limiting. Constructed once at startup and handed to request handlers
//! through the application state.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use super::ledger::UsageLedger;
use crate::domain::clock::Clock;
use crate::domain::key::KeyRegistry;
use crate::domain::DomainError;

pub struct KeyStore {
    registry: KeyRegistry,
    master_keys: HashSet<String>,
    ledger: Arc<dyn UsageLedger>,
    clock: Arc<dyn Clock>,
    window_seconds: u64,
    max_requests: u32,
}

impl KeyStore {
    pub fn new(
        registry: KeyRegistry,
        master_keys: HashSet<String>,
        ledger: Arc<dyn UsageLedger>,
        clock: Arc<dyn Clock>,
        window_seconds: u64,
        max_requests: u32,
    ) -> Self {
        Self {
            registry,
            master_keys,
            ledger,
            clock,
            window_seconds,
            max_requests,
        }
    }

    /// Validate a presented key for a request from `client_ip`.
    ///
    /// Expiry is checked before rate limiting so an expired key never
    /// consumes window budget. Unknown and expired keys are both reported as
    /// `InvalidKey`; the distinction only reaches the logs.
    pub async fn validate(&self, key: &str, client_ip: &str) -> Result<(), DomainError> {
        if self.master_keys.contains(key) {
            debug!("Master key presented, bypassing expiry and rate limit");
            return Ok(());
        }

        let record = self.registry.get(key).ok_or(DomainError::InvalidKey)?;

        if !record.is_valid_on(self.clock.today()) {
            debug!(expiry = %record.expiry, "Rejecting expired key");
            return Err(DomainError::InvalidKey);
        }

        if record.rate_limited {
            let cap = record.max_requests.unwrap_or(self.max_requests);
            let admitted = self
                .ledger
                .admit(
                    key,
                    client_ip,
                    self.clock.epoch_seconds(),
                    self.window_seconds,
                    cap,
                )
                .await;

            if !admitted {
                debug!(client_ip, cap, "Rate limit window exhausted");
                return Err(DomainError::RateLimited);
            }
        }

        Ok(())
    }

    /// Number of registered (non-master) keys, for readiness reporting.
    pub fn key_count(&self) -> usize {
        self.registry.len()
    }
}
