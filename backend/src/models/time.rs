use chrono::{DateTime, Utc};
use serde::*;

/// MJD of the Unix epoch (1970-01-01 00:00:00 UTC).
pub const MJD_UNIX_EPOCH: f64 = 40587.0;

/// Offset between Julian Date and Modified Julian Date.
pub const MJD_TO_JD: f64 = 2_400_000.5;

/// Julian Date of the J2000.0 epoch (2000-01-01 12:00 TT, treated as UTC here).
pub const JD_J2000: f64 = 2_451_545.0;

/// Days in a Julian century.
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Modified Julian Date representation.
/// MJD 0 = 1858-11-17 00:00:00 UTC
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ModifiedJulianDate(qtty::Days);

impl ModifiedJulianDate {
    /// Create a new MJD value.
    pub fn new(v: f64) -> Self {
        Self(qtty::Days::new(v))
    }

    /// Raw MJD value as f64.
    pub fn value(&self) -> f64 {
        self.0.value()
    }

    /// Convert to Unix timestamp (seconds since 1970-01-01 00:00:00 UTC).
    pub fn to_unix_timestamp(&self) -> f64 {
        (self.value() - MJD_UNIX_EPOCH) * 86400.0
    }

    /// Create from Unix timestamp (seconds since 1970-01-01 00:00:00 UTC).
    pub fn from_unix_timestamp(timestamp: f64) -> Self {
        Self::new(timestamp / 86400.0 + MJD_UNIX_EPOCH)
    }

    /// Convert to chrono DateTime<Utc>.
    pub fn to_datetime(&self) -> DateTime<Utc> {
        let secs = self.to_unix_timestamp();
        let secs_i64 = secs.floor() as i64;
        let nanos = ((secs - secs.floor()) * 1e9) as u32;
        DateTime::from_timestamp(secs_i64, nanos).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Create from chrono DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self::from_unix_timestamp(dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 / 1e9)
    }

    /// Full Julian Date.
    pub fn julian_day(&self) -> f64 {
        self.value() + MJD_TO_JD
    }

    /// Days elapsed since J2000.0 (negative before the epoch).
    pub fn days_since_j2000(&self) -> f64 {
        self.julian_day() - JD_J2000
    }

    /// Julian centuries elapsed since J2000.0.
    pub fn centuries_since_j2000(&self) -> f64 {
        self.days_since_j2000() / DAYS_PER_JULIAN_CENTURY
    }
}

impl From<f64> for ModifiedJulianDate {
    fn from(v: f64) -> Self {
        ModifiedJulianDate::new(v)
    }
}

impl From<DateTime<Utc>> for ModifiedJulianDate {
    fn from(dt: DateTime<Utc>) -> Self {
        ModifiedJulianDate::from_datetime(dt)
    }
}
