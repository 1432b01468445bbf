//! # Timestamp Value Object
//!
//! UTC point in time used for every `*At` / `*Date` field.
//!
//! # Examples
//!
//! ```
//! use marketplace_rfq::domain::value_objects::timestamp::Timestamp;
//!
//! let sent = Timestamp::from_secs(1_704_067_200).unwrap();
//! let viewed = sent.add_secs(90);
//!
//! assert!(viewed.is_after(&sent));
//! assert_eq!(sent.to_iso8601(), "2024-01-01T00:00:00.000Z");
//! ```

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC timestamp with millisecond-or-better precision.
///
/// Serializes as an RFC 3339 string, which is also what the legacy JSON
/// store holds for date-valued fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// From Unix epoch milliseconds; `None` when out of range.
    ///
    /// Returns `None` if the value is out of range.
    #[must_use]
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    /// From Unix epoch seconds; `None` when out of range.
    ///
    /// Returns `None` if the value is out of range.
    #[must_use]
    pub fn from_secs(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(Self)
    }

    /// Creates a timestamp at midnight UTC of the given calendar date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }

    /// Parses the date representations found in stored marketplace data.
    ///
    /// Accepts, in order: RFC 3339 (`2024-05-01T10:00:00.000Z`), a naive
    /// date-time taken as UTC (`2024-05-01T10:00:00`), and a bare calendar
    /// date taken as midnight UTC (`2024-05-01`).
    ///
    /// # Examples
    ///
    /// ```
    /// use marketplace_rfq::domain::value_objects::timestamp::Timestamp;
    ///
    /// let a = Timestamp::parse_lenient("2024-05-01").unwrap();
    /// let b = Timestamp::parse_lenient("2024-05-01T00:00:00.000Z").unwrap();
    /// assert_eq!(a, b);
    /// assert!(Timestamp::parse_lenient("yesterday").is_none());
    /// ```
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self(dt.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(Self(naive.and_utc()));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .map(Self::from_date)
    }

    /// Unix epoch milliseconds, the numeric form the store accepts.
    #[inline]
    #[must_use]
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Adds seconds to the timestamp (negative values subtract).
    #[must_use]
    pub fn add_secs(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }

    /// Adds whole days to the timestamp (negative values subtract).
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Strictly earlier than `other`.
    #[inline]
    #[must_use]
    pub fn is_before(&self, other: &Self) -> bool {
        self.0 < other.0
    }

    /// Strictly later than `other`.
    #[inline]
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.0 > other.0
    }

    /// Formats the timestamp as RFC 3339 with millisecond precision and a
    /// `Z` suffix, the shape browsers produce for `Date.toJSON()`.
    #[must_use]
    pub fn to_iso8601(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Returns the calendar date in UTC.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Borrows the inner `chrono` value.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}
