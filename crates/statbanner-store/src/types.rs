//! Data types for dated snapshot records.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use statbanner_core::{CombinedStats, Error, Result};

static DATE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^stats_(\d{4}-\d{2}-\d{2})\.json$").unwrap());

/// Identifier of a snapshot record: the UTC calendar date it was captured on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The key for the UTC calendar date containing `at`.
    pub fn for_timestamp(at: DateTime<Utc>) -> Self {
        Self(at.date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The calendar day before this one.
    pub fn previous(&self) -> Self {
        Self(self.0 - Duration::days(1))
    }

    /// Storage key, e.g. `stats_2024-01-03.json`.
    pub fn storage_key(&self) -> String {
        format!("stats_{}.json", self.0.format("%Y-%m-%d"))
    }

    /// Parse a storage key. Returns `None` for anything that is not exactly
    /// `stats_YYYY-MM-DD.json` with a real calendar date.
    pub fn parse(key: &str) -> Option<Self> {
        let caps = DATE_KEY_RE.captures(key)?;
        NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok().map(Self)
    }
}

impl std::fmt::Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.storage_key())
    }
}

impl std::str::FromStr for DateKey {
    type Err = Error;

    /// Accepts either a full storage key or a bare `YYYY-MM-DD` date.
    fn from_str(s: &str) -> Result<Self> {
        if let Some(key) = Self::parse(s) {
            return Ok(key);
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| Error::InvalidKey(s.to_string()))
    }
}

/// A persisted snapshot: both sources as captured at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    /// Capture time, serialized as an RFC 3339 UTC string.
    pub timestamp: DateTime<Utc>,
    pub stats: CombinedStats,
}

impl SnapshotRecord {
    pub fn new(timestamp: DateTime<Utc>, stats: CombinedStats) -> Self {
        Self { timestamp, stats }
    }

    /// The key this record belongs under.
    pub fn date_key(&self) -> DateKey {
        DateKey::for_timestamp(self.timestamp)
    }
}

/// Outcome of a prune pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PruneReport {
    pub kept: Vec<String>,
    pub removed: Vec<String>,
    pub failed: Vec<String>,
}

impl PruneReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateKey {
        DateKey::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_storage_key_format() {
        assert_eq!(date(2024, 1, 3).storage_key(), "stats_2024-01-03.json");
        assert_eq!(date(2024, 1, 3).to_string(), "stats_2024-01-03.json");
    }

    #[test]
    fn test_parse_valid_and_malformed() {
        assert_eq!(DateKey::parse("stats_2024-01-03.json"), Some(date(2024, 1, 3)));
        assert_eq!(DateKey::parse("stats_2024-02-30.json"), None);
        assert_eq!(DateKey::parse("stats_2024-1-3.json"), None);
        assert_eq!(DateKey::parse("stats_2024-01-03.json.tmp"), None);
        assert_eq!(DateKey::parse("latest.json"), None);
        assert_eq!(DateKey::parse("xstats_2024-01-03.json"), None);
    }

    #[test]
    fn test_previous_crosses_boundaries() {
        assert_eq!(date(2024, 3, 1).previous(), date(2024, 2, 29));
        assert_eq!(date(2024, 1, 1).previous(), date(2023, 12, 31));
    }

    #[test]
    fn test_for_timestamp_uses_utc_date() {
        let late = Utc.with_ymd_and_hms(2024, 1, 3, 23, 59, 59).unwrap();
        let early = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
        assert_eq!(DateKey::for_timestamp(late), date(2024, 1, 3));
        assert_eq!(DateKey::for_timestamp(early), date(2024, 1, 3));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("2024-01-03".parse::<DateKey>().unwrap(), date(2024, 1, 3));
        assert_eq!(
            "stats_2024-01-03.json".parse::<DateKey>().unwrap(),
            date(2024, 1, 3)
        );
        assert!(matches!("yesterday".parse::<DateKey>(), Err(Error::InvalidKey(_))));
    }
}
