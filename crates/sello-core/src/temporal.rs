//! # Temporal Types
//!
//! UTC-only timestamps and the day-granular epoch bucket used to group
//! proofs. All timestamps are stored in UTC with second-level precision
//! and a `Z` suffix in serialized form; local time is a presentation
//! concern.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A UTC timestamp with second-level precision.
///
/// Serializes to ISO 8601 with a `Z` suffix (e.g. `2026-01-15T12:00:00Z`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current UTC time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wrap a `chrono::DateTime<Utc>`.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Build from whole seconds since the Unix epoch. Out-of-range values
    /// saturate to the epoch itself.
    pub fn from_unix_seconds(secs: i64) -> Self {
        Self(
            DateTime::<Utc>::from_timestamp(secs, 0)
                .unwrap_or_else(|| DateTime::<Utc>::from_timestamp(0, 0).expect("epoch is valid")),
        )
    }

    /// Access the underlying `chrono::DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Whole seconds since the Unix epoch.
    pub fn unix_seconds(&self) -> i64 {
        self.0.timestamp()
    }

    /// This timestamp shifted forward by whole days.
    pub fn plus_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// This timestamp shifted forward by whole hours.
    pub fn plus_hours(&self, hours: i64) -> Self {
        Self(self.0 + Duration::hours(hours))
    }

    /// ISO 8601 string with `Z` suffix, truncated to seconds.
    pub fn to_canonical_string(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

/// A coarse time bucket: whole days since the Unix epoch.
///
/// Groups proofs generated on the same calendar day. The bucket is part of
/// the proof-id pre-image, so two generations by the same holder on
/// different days always produce different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Epoch(u64);

impl Epoch {
    const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

    /// Wrap a raw epoch number.
    pub fn new(epoch: u64) -> Self {
        Self(epoch)
    }

    /// The epoch bucket containing `at`. Pre-1970 clocks clamp to epoch 0.
    pub fn containing(at: &Timestamp) -> Self {
        let days = at.unix_seconds().div_euclid(Self::SECONDS_PER_DAY);
        Self(days.max(0) as u64)
    }

    /// The raw epoch number.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Big-endian wire bytes, as bound into commitment pre-images.
    pub fn to_be_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_string_truncates_to_seconds() {
        let ts = Timestamp::from_unix_seconds(1_700_000_000);
        assert_eq!(ts.to_canonical_string(), "2023-11-14T22:13:20Z");
    }

    #[test]
    fn epoch_is_whole_days() {
        let ts = Timestamp::from_unix_seconds(3 * 86_400 + 12 * 3_600);
        assert_eq!(Epoch::containing(&ts), Epoch::new(3));
    }

    #[test]
    fn epoch_boundary() {
        assert_eq!(
            Epoch::containing(&Timestamp::from_unix_seconds(86_399)),
            Epoch::new(0)
        );
        assert_eq!(
            Epoch::containing(&Timestamp::from_unix_seconds(86_400)),
            Epoch::new(1)
        );
    }

    #[test]
    fn plus_days_and_hours() {
        let ts = Timestamp::from_unix_seconds(0);
        assert_eq!(ts.plus_days(30).unix_seconds(), 30 * 86_400);
        assert_eq!(ts.plus_hours(72).unix_seconds(), 72 * 3_600);
    }

    #[test]
    fn ordering_follows_the_clock() {
        let early = Timestamp::from_unix_seconds(100);
        let late = Timestamp::from_unix_seconds(200);
        assert!(early < late);
    }
}
