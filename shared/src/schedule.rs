//! Slot arithmetic
//!
//! Start/end windows, duration bounds and the closing-time cutoff. All
//! functions are pure and total given valid inputs; malformed timestamps
//! fail with [`InvalidWindow`].
//!
//! The service speaks local wall-clock time with seconds precision and no
//! offset (`YYYY-MM-DDTHH:mm:ss`), so every timestamp here is a
//! [`NaiveDateTime`].

use chrono::{Duration, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// Shortest bookable slot.
pub const MIN_DURATION_MINUTES: i64 = 30;
/// Longest bookable slot (5 hours).
pub const MAX_DURATION_MINUTES: i64 = 300;
/// Duration preselected by booking forms (2 hours).
pub const DEFAULT_DURATION_MINUTES: i64 = 120;
/// Slots must end by this hour of the start's calendar day (22:00 local).
pub const CLOSING_HOUR: u32 = 22;

/// Wire format of the service: local time, seconds precision, no offset.
pub const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Why a window could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidWindow {
    #[error("not a local date-time: {0}")]
    Unparseable(String),

    #[error("window must end after it starts")]
    NonPositive,

    #[error("window is not a whole number of minutes")]
    SubMinute,
}

/// A contiguous start-end interval requested for a table.
///
/// Constructed transiently per interaction, never persisted. Valid by
/// construction: `end > start` and the span is a whole number of minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, InvalidWindow> {
        if end <= start {
            return Err(InvalidWindow::NonPositive);
        }
        if (end - start).num_seconds() % 60 != 0 {
            return Err(InvalidWindow::SubMinute);
        }
        Ok(Self { start, end })
    }

    /// Window starting at `start` and lasting `minutes`.
    pub fn from_duration(start: NaiveDateTime, minutes: i64) -> Result<Self, InvalidWindow> {
        let end = start
            .checked_add_signed(Duration::minutes(minutes))
            .ok_or(InvalidWindow::NonPositive)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Whole minutes between start and end.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Whether both bounds share a calendar day and the end respects the
    /// closing boundary.
    pub fn within_closing(&self) -> bool {
        self.start.date() == self.end.date() && self.end <= closing_of(self.start)
    }
}

/// The closing boundary of `start`'s calendar day.
fn closing_of(start: NaiveDateTime) -> NaiveDateTime {
    start.date().and_time(NaiveTime::MIN) + Duration::hours(CLOSING_HOUR as i64)
}

/// Minutes remaining between `start` and the same day's closing boundary,
/// clamped to `[0, MAX_DURATION_MINUTES]`.
///
/// `0` means no valid duration remains that day (start at or past closing).
pub fn max_duration_from(start: NaiveDateTime) -> i64 {
    (closing_of(start) - start).num_minutes().clamp(0, MAX_DURATION_MINUTES)
}

/// Whether the requested start already lies in the past.
pub fn is_past(start: NaiveDateTime, now: NaiveDateTime) -> bool {
    start < now
}

/// Parse a service timestamp.
///
/// Tolerates the minute-precision spelling produced by `datetime-local`
/// inputs and a fractional-seconds suffix; everything else is
/// [`InvalidWindow::Unparseable`].
pub fn parse_local(value: &str) -> Result<NaiveDateTime, InvalidWindow> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, LOCAL_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .map_err(|_| InvalidWindow::Unparseable(value.to_string()))
}

/// Format a timestamp the way the service expects it.
pub fn format_local(value: NaiveDateTime) -> String {
    value.format(LOCAL_FORMAT).to_string()
}

/// Serde adapter pinning the service's local date-time wire format.
pub mod local_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::{format_local, parse_local};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_local(*value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_local(&raw).map_err(de::Error::custom)
    }
}
