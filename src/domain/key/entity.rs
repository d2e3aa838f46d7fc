//! API key records and the key registry

use std::collections::HashMap;

use chrono::NaiveDate;

/// Expiry dates in the key file use day/month/year.
pub const EXPIRY_FORMAT: &str = "%d/%m/%Y";

/// One entry in the key registry.
///
/// Parsed from a colon-delimited line: `<key>:<expiry DD/MM/YYYY>[:limit|<n>]`.
/// A literal `limit` third field marks the key rate-limited with the configured
/// default cap; a numeric third field is a per-key cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRecord {
    pub key: String,
    /// The key is invalid strictly after this UTC day.
    pub expiry: NaiveDate,
    pub rate_limited: bool,
    /// Per-key request cap; `None` falls back to the configured default.
    pub max_requests: Option<u32>,
}

impl KeyRecord {
    pub fn new(key: impl Into<String>, expiry: NaiveDate) -> Self {
        Self {
            key: key.into(),
            expiry,
            rate_limited: false,
            max_requests: None,
        }
    }

    pub fn with_limit(mut self, max_requests: Option<u32>) -> Self {
        self.rate_limited = true;
        self.max_requests = max_requests;
        self
    }

    /// Parse one registry line. Returns `None` for blank lines, lines with
    /// fewer than two fields, or lines whose expiry date does not parse.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let mut fields = line.splitn(3, ':');
        let key = fields.next()?.trim();
        let expiry = fields.next()?.trim();
        if key.is_empty() || expiry.is_empty() {
            return None;
        }

        let expiry = NaiveDate::parse_from_str(expiry, EXPIRY_FORMAT).ok()?;
        let mut record = Self::new(key, expiry);

        if let Some(flag) = fields.next().map(str::trim) {
            if flag.eq_ignore_ascii_case("limit") {
                record = record.with_limit(None);
            } else if let Ok(cap) = flag.parse::<u32>() {
                record = record.with_limit(Some(cap));
            }
            // Any other third field is ignored; the key loads as unlimited.
        }

        Some(record)
    }

    /// Whether the key is still usable on the given day.
    pub fn is_valid_on(&self, today: NaiveDate) -> bool {
        today <= self.expiry
    }
}

/// Mapping from key string to record.
///
/// Duplicate key strings keep the first occurrence; load order defines
/// precedence.
#[derive(Debug, Clone, Default)]
pub struct KeyRegistry {
    records: HashMap<String, KeyRecord>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record unless the key is already present. Returns whether the
    /// record was stored.
    pub fn insert(&mut self, record: KeyRecord) -> bool {
        if self.records.contains_key(&record.key) {
            return false;
        }
        self.records.insert(record.key.clone(), record);
        true
    }

    pub fn get(&self, key: &str) -> Option<&KeyRecord> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<KeyRecord> for KeyRegistry {
    fn from_iter<I: IntoIterator<Item = KeyRecord>>(iter: I) -> Self {
        let mut registry = Self::new();
        for record in iter {
            registry.insert(record);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_unlimited_line() {
        let record = KeyRecord::parse_line("ABC123:31/12/2099").unwrap();

        assert_eq!(record.key, "ABC123");
        assert_eq!(record.expiry, date(2099, 12, 31));
        assert!(!record.rate_limited);
        assert_eq!(record.max_requests, None);
    }

    #[test]
    fn test_parse_limit_flag() {
        let record = KeyRecord::parse_line("ABC123:31/12/2099:limit").unwrap();

        assert!(record.rate_limited);
        assert_eq!(record.max_requests, None);
    }

    #[test]
    fn test_parse_numeric_cap() {
        let record = KeyRecord::parse_line("ABC123:31/12/2099:25").unwrap();

        assert!(record.rate_limited);
        assert_eq!(record.max_requests, Some(25));
    }

    #[test]
    fn test_parse_unknown_flag_ignored() {
        let record = KeyRecord::parse_line("ABC123:31/12/2099:whatever").unwrap();
        assert!(!record.rate_limited);
    }

    #[test]
    fn test_parse_rejects_short_lines() {
        assert!(KeyRecord::parse_line("").is_none());
        assert!(KeyRecord::parse_line("   ").is_none());
        assert!(KeyRecord::parse_line("just-a-key").is_none());
        assert!(KeyRecord::parse_line("key:").is_none());
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        assert!(KeyRecord::parse_line("ABC123:2099-12-31").is_none());
        assert!(KeyRecord::parse_line("ABC123:99/99/2099").is_none());
    }

    #[test]
    fn test_validity_is_day_granular() {
        let record = KeyRecord::new("k", date(2025, 6, 15));

        assert!(record.is_valid_on(date(2025, 6, 14)));
        // Still valid on the expiry day itself.
        assert!(record.is_valid_on(date(2025, 6, 15)));
        assert!(!record.is_valid_on(date(2025, 6, 16)));
    }

    #[test]
    fn test_registry_first_match_wins() {
        let mut registry = KeyRegistry::new();
        assert!(registry.insert(KeyRecord::new("dup", date(2030, 1, 1))));
        assert!(!registry.insert(KeyRecord::new("dup", date(2000, 1, 1)).with_limit(None)));

        let record = registry.get("dup").unwrap();
        assert_eq!(record.expiry, date(2030, 1, 1));
        assert!(!record.rate_limited);
    }
}
