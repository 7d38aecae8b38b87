//! Timestamps and the clock collaborator.
//!
//! The countdown works in whole milliseconds since the Unix epoch, the same unit
//! a browser's `Date.getTime()` produces, so persisted records stay
//! interchangeable with other front ends. Wall-clock reads and local-zone
//! conversions sit behind the [`Clock`] trait, which lets the engine and the
//! widget run against a [`FixedClock`] in tests.

use chrono::{
    FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Milliseconds per day.
pub const MS_PER_DAY: i64 = 86_400_000;
/// Milliseconds per hour.
pub const MS_PER_HOUR: i64 = 3_600_000;
/// Milliseconds per minute.
pub const MS_PER_MINUTE: i64 = 60_000;
/// Milliseconds per second.
pub const MS_PER_SECOND: i64 = 1000;

/// An absolute instant in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Wraps a raw millisecond count.
    pub const fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    /// Returns the raw millisecond count.
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Milliseconds from `earlier` to `self`; negative when `earlier` is later.
    pub fn millis_since(self, earlier: Timestamp) -> i64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Shifts the instant by `ms` milliseconds.
    pub fn add_millis(self, ms: i64) -> Self {
        Self(self.0.saturating_add(ms))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Source of the current instant and of the local time zone.
///
/// Date and time inputs are interpreted in the clock's local zone, the same
/// zone the clock reports "now" in. No other zone conversion happens anywhere
/// in the crate.
pub trait Clock: fmt::Debug + Send + Sync {
    /// The current instant.
    fn now(&self) -> Timestamp;

    /// Converts a local wall-clock date-time to an instant.
    ///
    /// Returns `None` when the local time does not exist (for example inside a
    /// daylight-saving gap). Ambiguous times resolve to the earlier instant.
    fn local_to_timestamp(&self, local: NaiveDateTime) -> Option<Timestamp>;

    /// Converts an instant back to local wall-clock time.
    fn timestamp_to_local(&self, ts: Timestamp) -> Option<NaiveDateTime>;
}

/// The machine's clock in the machine's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp(Utc::now().timestamp_millis())
    }

    fn local_to_timestamp(&self, local: NaiveDateTime) -> Option<Timestamp> {
        Local
            .from_local_datetime(&local)
            .earliest()
            .map(|dt| Timestamp(dt.timestamp_millis()))
    }

    fn timestamp_to_local(&self, ts: Timestamp) -> Option<NaiveDateTime> {
        Local
            .timestamp_millis_opt(ts.0)
            .single()
            .map(|dt| dt.naive_local())
    }
}

/// A manually driven clock with a fixed UTC offset.
///
/// Clones share the same instant, so a test can hand one clone to the widget
/// and keep another to advance time.
///
/// ```rust
/// use countdown_widget::clock::{Clock, FixedClock, Timestamp};
///
/// let clock = FixedClock::new(Timestamp::from_millis(1_000));
/// let shared = clock.clone();
/// clock.advance(500);
/// assert_eq!(shared.now(), Timestamp::from_millis(1_500));
/// ```
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<AtomicI64>,
    offset: FixedOffset,
}

impl FixedClock {
    /// A clock frozen at `now`, in UTC.
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(now.0)),
            offset: Utc.fix(),
        }
    }

    /// A clock frozen at the given local wall-clock time, in UTC.
    ///
    /// Returns `None` if `local` is not a valid `YYYY-MM-DD` / `HH:MM` pair.
    pub fn at_local(date: &str, time: &str) -> Option<Self> {
        let local = parse_local(date, time)?;
        Some(Self::new(Timestamp(local.and_utc().timestamp_millis())))
    }

    /// Uses `offset` as the local zone.
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: Timestamp) {
        self.now.store(now.0, Ordering::SeqCst);
    }

    /// Moves the clock forward by `ms` milliseconds.
    pub fn advance(&self, ms: i64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.now.load(Ordering::SeqCst))
    }

    fn local_to_timestamp(&self, local: NaiveDateTime) -> Option<Timestamp> {
        self.offset
            .from_local_datetime(&local)
            .single()
            .map(|dt| Timestamp(dt.timestamp_millis()))
    }

    fn timestamp_to_local(&self, ts: Timestamp) -> Option<NaiveDateTime> {
        self.offset
            .timestamp_millis_opt(ts.0)
            .single()
            .map(|dt| dt.naive_local())
    }
}

/// Parses a `YYYY-MM-DD` date input.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

/// Parses an `HH:MM` time input. `HH:MM:SS` is accepted as well, since time
/// pickers emit seconds when a step below one minute is configured.
pub fn parse_time(input: &str) -> Option<NaiveTime> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .ok()
}

/// Combines a date input and a time input into a local date-time.
pub fn parse_local(date: &str, time: &str) -> Option<NaiveDateTime> {
    Some(parse_date(date)?.and_time(parse_time(time)?))
}
