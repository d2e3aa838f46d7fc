//! Key generation for the registry file
//!
//! Produces random URL-safe keys and the colon-delimited registry lines the
//! loader understands. Used by the `keygen` CLI subcommand; keys are stored
//! bare because the flat-file format has no hash column.

use std::io::Write;
use std::path::Path;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::NaiveDate;
use rand::RngCore;

use crate::domain::key::EXPIRY_FORMAT;

#[derive(Debug, Clone)]
pub struct KeyGenerator {
    prefix: String,
    key_bytes: usize,
}

impl KeyGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            key_bytes: 18,
        }
    }

    pub fn with_key_bytes(mut self, bytes: usize) -> Self {
        self.key_bytes = bytes;
        self
    }

    /// Generate a new random key string.
    pub fn generate(&self) -> String {
        let mut random_bytes = vec![0u8; self.key_bytes];
        rand::thread_rng().fill_bytes(&mut random_bytes);

        format!("{}{}", self.prefix, URL_SAFE_NO_PAD.encode(&random_bytes))
    }

    /// Format a registry line for the given key.
    ///
    /// `cap` of `Some(n)` writes a numeric per-key cap; `limited` without a
    /// cap writes the literal `limit` flag.
    pub fn format_line(key: &str, expiry: NaiveDate, limited: bool, cap: Option<u32>) -> String {
        let expiry = expiry.format(EXPIRY_FORMAT);
        match (limited, cap) {
            (_, Some(cap)) => format!("{key}:{expiry}:{cap}"),
            (true, None) => format!("{key}:{expiry}:limit"),
            (false, None) => format!("{key}:{expiry}"),
        }
    }

    /// Append a registry line to the key file, creating it if absent.
    pub fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        writeln!(file, "{line}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_generate_unique_keys_with_prefix() {
        let generator = KeyGenerator::new("mg_");
        let a = generator.generate();
        let b = generator.generate();

        assert!(a.starts_with("mg_"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_generated_key_round_trips_through_parser() {
        let generator = KeyGenerator::new("");
        let key = generator.generate();
        let line = KeyGenerator::format_line(&key, date(2099, 12, 31), true, None);

        let record = crate::domain::key::KeyRecord::parse_line(&line).unwrap();
        assert_eq!(record.key, key);
        assert!(record.rate_limited);
    }

    #[test]
    fn test_format_line_variants() {
        let expiry = date(2026, 1, 5);

        assert_eq!(
            KeyGenerator::format_line("K", expiry, false, None),
            "K:05/01/2026"
        );
        assert_eq!(
            KeyGenerator::format_line("K", expiry, true, None),
            "K:05/01/2026:limit"
        );
        assert_eq!(
            KeyGenerator::format_line("K", expiry, true, Some(40)),
            "K:05/01/2026:40"
        );
    }

    #[test]
    fn test_append_line_accumulates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.txt");

        KeyGenerator::append_line(&path, "A:01/01/2030").unwrap();
        KeyGenerator::append_line(&path, "B:01/01/2030:limit").unwrap();

        let registry = crate::infrastructure::key_store::loader::load_registry(&path);
        assert_eq!(registry.len(), 2);
    }
}
