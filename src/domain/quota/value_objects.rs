//! Quota domain value objects

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Placeholder identity for callers without a resolvable network address.
///
/// All such callers share one hash bucket and therefore one monthly credit.
const UNKNOWN_IDENTITY: &str = "unknown";

/// One-way token standing in for a caller's network address.
///
/// The raw address is hashed immediately and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityHash(String);

impl IdentityHash {
    /// Hash a caller-supplied address. A missing address maps to the shared
    /// "unknown" identity rather than failing.
    pub fn from_raw(raw_address: Option<&str>) -> Self {
        let source = match raw_address {
            Some(addr) if !addr.trim().is_empty() => addr.trim(),
            _ => UNKNOWN_IDENTITY,
        };

        let mut hasher = Sha256::new();
        hasher.update(source.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Reconstruct a hash read back from the store.
    pub fn from_stored(hash: String) -> Self {
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IdentityHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Calendar month partition key, formatted as zero-padded `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthKey(String);

impl MonthKey {
    /// The month of the invocation instant, from server wall-clock time.
    pub fn current() -> Self {
        Self::from_datetime(&Utc::now())
    }

    pub fn from_datetime(at: &DateTime<Utc>) -> Self {
        Self(format!("{:04}-{:02}", at.year(), at.month()))
    }

    /// Reconstruct a key read back from the store.
    pub fn from_stored(key: String) -> Self {
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn identity_hash_is_deterministic() {
        let a = IdentityHash::from_raw(Some("203.0.113.7"));
        let b = IdentityHash::from_raw(Some("203.0.113.7"));
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_addresses_produce_distinct_hashes() {
        let a = IdentityHash::from_raw(Some("203.0.113.7"));
        let b = IdentityHash::from_raw(Some("203.0.113.8"));
        assert_ne!(a, b);
    }

    #[test]
    fn missing_and_blank_addresses_share_the_unknown_bucket() {
        let missing = IdentityHash::from_raw(None);
        let blank = IdentityHash::from_raw(Some("   "));
        let literal = IdentityHash::from_raw(Some("unknown"));
        assert_eq!(missing, blank);
        assert_eq!(missing, literal);
    }

    #[test]
    fn raw_address_never_appears_in_the_hash() {
        let hash = IdentityHash::from_raw(Some("198.51.100.23"));
        assert!(!hash.as_str().contains("198.51.100.23"));
        assert_eq!(hash.as_str().len(), 64);
    }

    #[test]
    fn month_key_is_zero_padded() {
        let march = Utc.with_ymd_and_hms(2025, 3, 9, 12, 0, 0).unwrap();
        assert_eq!(MonthKey::from_datetime(&march).as_str(), "2025-03");

        let december = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(MonthKey::from_datetime(&december).as_str(), "2025-12");
    }
}
