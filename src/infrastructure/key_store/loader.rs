//! Flat-file key registry loading
//!
//! An unreadable file degrades to an empty registry instead of failing the
//! process: the gateway stays up and rejects every key until the file is
//! fixed.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};

use crate::domain::key::{KeyRecord, KeyRegistry};

/// Load the key registry from a line-oriented file.
///
/// Malformed lines are skipped; duplicate keys keep their first occurrence.
pub fn load_registry(path: &Path) -> KeyRegistry {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Key file unreadable, no keys loaded");
            return KeyRegistry::new();
        }
    };

    let mut registry = KeyRegistry::new();
    for (number, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match KeyRecord::parse_line(line) {
            Some(record) => {
                if !registry.insert(record) {
                    debug!(line = number + 1, "Duplicate key line ignored");
                }
            }
            None => debug!(line = number + 1, "Skipping malformed key line"),
        }
    }

    debug!(path = %path.display(), keys = registry.len(), "Key registry loaded");
    registry
}

/// Load the master-key set: one bare key per line, no expiry.
pub fn load_master_keys(path: &Path) -> HashSet<String> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Master key file unreadable, none loaded");
            return HashSet::new();
        }
    };

    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_registry_mixed_lines() {
        let file = write_temp(
            "GOOD1:31/12/2099\n\
             GOOD2:01/06/2030:limit\n\
             malformed-no-colon\n\
             GOOD3:15/03/2028:40\n\
             \n\
             BADDATE:2099-12-31\n",
        );

        let registry = load_registry(file.path());

        assert_eq!(registry.len(), 3);
        assert!(!registry.get("GOOD1").unwrap().rate_limited);
        assert!(registry.get("GOOD2").unwrap().rate_limited);
        assert_eq!(registry.get("GOOD3").unwrap().max_requests, Some(40));
        assert!(registry.get("malformed-no-colon").is_none());
        assert!(registry.get("BADDATE").is_none());
    }

    #[test]
    fn test_load_registry_duplicate_keeps_first() {
        let file = write_temp("DUP:31/12/2099\nDUP:01/01/2000:limit\n");

        let registry = load_registry(file.path());

        assert_eq!(registry.len(), 1);
        let record = registry.get("DUP").unwrap();
        assert!(!record.rate_limited);
        assert_eq!(
            record.expiry,
            chrono::NaiveDate::from_ymd_opt(2099, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_load_registry_missing_file_is_empty() {
        let registry = load_registry(Path::new("/nonexistent/keys.txt"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_master_keys() {
        let file = write_temp("MASTER1\n\n  MASTER2  \n");

        let keys = load_master_keys(file.path());

        assert_eq!(keys.len(), 2);
        assert!(keys.contains("MASTER1"));
        assert!(keys.contains("MASTER2"));
    }

    #[test]
    fn test_load_master_keys_missing_file_is_empty() {
        assert!(load_master_keys(Path::new("/nonexistent/masterkeys.txt")).is_empty());
    }
}
