//! The countdown state machine.
//!
//! [`CountdownEngine`] owns the target instant, the instant the countdown was
//! started, and the title. Remaining time is never stored: every query derives
//! it from the target and the current instant. The engine performs no I/O;
//! the widget in [`countdown`](crate::countdown) decides when to persist,
//! share and render.
//!
//! # Basic Usage
//!
//! ```rust
//! use countdown_widget::clock::FixedClock;
//! use countdown_widget::engine::{CountdownEngine, Remaining};
//!
//! let clock = FixedClock::at_local("2024-12-31", "09:00").unwrap();
//! let mut engine = CountdownEngine::new(Box::new(clock.clone()));
//!
//! engine.start("2025-01-01", "10:00", "Launch").unwrap();
//!
//! clock.advance(2 * 60 * 60 * 1000);
//! match engine.remaining(engine.now()) {
//!     Remaining::Running(r) => assert_eq!((r.days, r.hours, r.minutes, r.seconds), (0, 23, 0, 0)),
//!     Remaining::Completed => unreachable!(),
//! }
//! ```

use chrono::{Duration as ChronoDuration, Timelike};

use crate::clock::{
    parse_date, parse_time, Clock, SystemClock, Timestamp, MS_PER_DAY, MS_PER_HOUR,
    MS_PER_MINUTE, MS_PER_SECOND,
};
use crate::error::{DeserializationError, ValidationError};
use crate::locale::Locale;
use crate::record::PersistedRecord;
use crate::share::{
    decode_component, encode_component, UrlParams, DATE_KEY, TIME_KEY, TITLE_KEY,
};

/// Snapshot of the countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownState {
    /// Instant being counted down to. `None` until a countdown is started.
    pub target_timestamp: Option<Timestamp>,
    /// Instant the countdown was started, the reference for progress.
    pub start_timestamp: Option<Timestamp>,
    /// Display title.
    pub title: String,
    /// Whether the countdown is live. Cleared on completion and reset.
    pub running: bool,
}

impl CountdownState {
    fn cleared(title: &str) -> Self {
        Self {
            target_timestamp: None,
            start_timestamp: None,
            title: title.to_string(),
            running: false,
        }
    }
}

/// Whole units left until the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemainingTime {
    /// Whole days, unbounded.
    pub days: u64,
    /// Hours, `0..=23`.
    pub hours: u64,
    /// Minutes, `0..=59`.
    pub minutes: u64,
    /// Seconds, `0..=59`.
    pub seconds: u64,
}

impl RemainingTime {
    /// Splits a positive millisecond difference into units.
    pub fn from_millis(diff: i64) -> Self {
        let diff = diff.max(0);
        Self {
            days: (diff / MS_PER_DAY) as u64,
            hours: ((diff % MS_PER_DAY) / MS_PER_HOUR) as u64,
            minutes: ((diff % MS_PER_HOUR) / MS_PER_MINUTE) as u64,
            seconds: ((diff % MS_PER_MINUTE) / MS_PER_SECOND) as u64,
        }
    }

    /// The decomposition expressed back in milliseconds.
    pub fn as_millis(&self) -> i64 {
        self.days as i64 * MS_PER_DAY
            + self.hours as i64 * MS_PER_HOUR
            + self.minutes as i64 * MS_PER_MINUTE
            + self.seconds as i64 * MS_PER_SECOND
    }
}

/// Result of a remaining-time query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remaining {
    /// The target is still ahead.
    Running(RemainingTime),
    /// The target has been reached, or no countdown is set.
    Completed,
}

impl Remaining {
    /// Whether the countdown is over.
    pub fn is_completed(&self) -> bool {
        matches!(self, Remaining::Completed)
    }
}

/// Date, time and title decoded from URL parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlInputs {
    /// Date input, `YYYY-MM-DD`.
    pub date: String,
    /// Time input, `HH:MM`.
    pub time: String,
    /// Decoded title, the placeholder when absent.
    pub title: String,
}

/// The countdown state machine.
#[derive(Debug)]
pub struct CountdownEngine {
    state: CountdownState,
    placeholder: String,
    clock: Box<dyn Clock>,
}

impl Default for CountdownEngine {
    fn default() -> Self {
        Self::new(Box::new(SystemClock))
    }
}

impl CountdownEngine {
    /// An empty engine reading time from `clock`, with the English placeholder.
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self::with_placeholder(clock, Locale::default().default_title())
    }

    /// An empty engine with a custom placeholder title.
    pub fn with_placeholder(clock: Box<dyn Clock>, placeholder: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        Self {
            state: CountdownState::cleared(&placeholder),
            placeholder,
            clock,
        }
    }

    /// Current state.
    pub fn state(&self) -> &CountdownState {
        &self.state
    }

    /// Title used when none is given.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// The current instant according to the engine's clock.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// The engine's clock.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Whether a countdown has been started and not reset.
    pub fn has_target(&self) -> bool {
        self.state.target_timestamp.is_some()
    }

    /// Starts a countdown to `date_input` + `time_input` at the current instant.
    pub fn start(
        &mut self,
        date_input: &str,
        time_input: &str,
        title: &str,
    ) -> Result<CountdownState, ValidationError> {
        let now = self.now();
        self.start_at(date_input, time_input, title, now)
    }

    /// Starts a countdown as if the current instant were `now`.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::MissingInput`] when either input is blank
    /// - [`ValidationError::InvalidInput`] when an input does not parse
    /// - [`ValidationError::NotInFuture`] when the target is not after `now`
    ///
    /// On error the engine state is left exactly as it was.
    pub fn start_at(
        &mut self,
        date_input: &str,
        time_input: &str,
        title: &str,
        now: Timestamp,
    ) -> Result<CountdownState, ValidationError> {
        let target = self.parse_target(date_input, time_input)?;
        if target <= now {
            return Err(ValidationError::NotInFuture);
        }

        self.state = CountdownState {
            target_timestamp: Some(target),
            start_timestamp: Some(now),
            title: self.resolve_title(title),
            running: true,
        };
        Ok(self.state.clone())
    }

    /// Remaining time until the target at `now`.
    pub fn remaining(&self, now: Timestamp) -> Remaining {
        match self.state.target_timestamp {
            Some(target) if now < target => {
                Remaining::Running(RemainingTime::from_millis(target.millis_since(now)))
            }
            _ => Remaining::Completed,
        }
    }

    /// Like [`remaining`](Self::remaining), and marks the countdown as no
    /// longer running once it has completed.
    pub fn tick(&mut self, now: Timestamp) -> Remaining {
        let remaining = self.remaining(now);
        if remaining.is_completed() {
            self.state.running = false;
        }
        remaining
    }

    /// Elapsed fraction of the countdown at `now`, in `[0, 1]`.
    ///
    /// Measured against the start instant captured by [`start`](Self::start),
    /// so it grows steadily from 0 to exactly 1 at the target. Returns 0 when
    /// no countdown is set.
    pub fn progress_fraction(&self, now: Timestamp) -> f64 {
        let (Some(start), Some(target)) = (self.state.start_timestamp, self.state.target_timestamp)
        else {
            return 0.0;
        };
        if now >= target {
            return 1.0;
        }
        let total = target.millis_since(start);
        if total <= 0 {
            return 1.0;
        }
        (now.millis_since(start) as f64 / total as f64).clamp(0.0, 1.0)
    }

    /// Clears the countdown. Calling it repeatedly yields the same state.
    pub fn reset(&mut self) -> CountdownState {
        self.state = CountdownState::cleared(&self.placeholder);
        self.state.clone()
    }

    /// The record to save for the current countdown, or `None` if nothing has
    /// been started.
    ///
    /// `date` and `time` are the inputs the countdown was started from; they
    /// are stored verbatim so a restore starts from the same inputs.
    pub fn serialize(&self, date: &str, time: &str) -> Option<PersistedRecord> {
        let target = self.state.target_timestamp?;
        Some(PersistedRecord {
            date: date.to_string(),
            time: time.to_string(),
            title: self.state.title.clone(),
            target_timestamp: target,
        })
    }

    /// Restores a countdown from a saved record at the current instant.
    pub fn deserialize(
        &mut self,
        record: &PersistedRecord,
    ) -> Result<CountdownState, DeserializationError> {
        let now = self.now();
        self.deserialize_at(record, now)
    }

    /// Restores a countdown from a saved record as if the current instant
    /// were `now`.
    ///
    /// # Errors
    ///
    /// - [`DeserializationError::Expired`] when the record's target is not
    ///   after `now`; the caller must not auto-start
    /// - [`DeserializationError::Malformed`] when the stored inputs no longer
    ///   parse
    pub fn deserialize_at(
        &mut self,
        record: &PersistedRecord,
        now: Timestamp,
    ) -> Result<CountdownState, DeserializationError> {
        if record.target_timestamp <= now {
            return Err(DeserializationError::Expired);
        }
        self.start_at(&record.date, &record.time, &record.title, now)
            .map_err(|err| match err {
                ValidationError::NotInFuture => DeserializationError::Expired,
                other => DeserializationError::Malformed(other.to_string()),
            })
    }

    /// URL parameters describing the current countdown: exactly `date`,
    /// `time` and `title`, in that order, with the title percent-encoded.
    pub fn to_url_parameters(&self, date: &str, time: &str) -> UrlParams {
        UrlParams::new()
            .with(DATE_KEY, date)
            .with(TIME_KEY, time)
            .with(TITLE_KEY, encode_component(&self.state.title))
    }

    /// Reads countdown inputs from URL parameters.
    ///
    /// Returns `None` unless both `date` and `time` are present and
    /// non-empty. A missing or empty `title` yields the placeholder. Other
    /// keys are ignored.
    pub fn from_url_parameters(&self, params: &UrlParams) -> Option<UrlInputs> {
        let date = params.get(DATE_KEY).filter(|v| !v.is_empty())?;
        let time = params.get(TIME_KEY).filter(|v| !v.is_empty())?;
        let title = params
            .get(TITLE_KEY)
            .map(|raw| decode_component(raw).unwrap_or_else(|| raw.to_string()))
            .unwrap_or_default();

        Some(UrlInputs {
            date: date.to_string(),
            time: time.to_string(),
            title: self.resolve_title(&title),
        })
    }

    /// Form defaults at `now`: today's date and the next whole hour.
    ///
    /// Falls back to empty strings if the clock cannot express `now` in local
    /// time.
    pub fn default_inputs(&self, now: Timestamp) -> (String, String) {
        let Some(local) = self.clock.timestamp_to_local(now) else {
            return (String::new(), String::new());
        };
        let next_hour = local
            .with_minute(0)
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .map(|t| t + ChronoDuration::hours(1))
            .unwrap_or(local);
        (
            local.format("%Y-%m-%d").to_string(),
            next_hour.format("%H:%M").to_string(),
        )
    }

    fn parse_target(
        &self,
        date_input: &str,
        time_input: &str,
    ) -> Result<Timestamp, ValidationError> {
        if date_input.trim().is_empty() || time_input.trim().is_empty() {
            return Err(ValidationError::MissingInput);
        }
        let date = parse_date(date_input).ok_or_else(|| ValidationError::InvalidInput {
            field: "date",
            value: date_input.to_string(),
        })?;
        let time = parse_time(time_input).ok_or_else(|| ValidationError::InvalidInput {
            field: "time",
            value: time_input.to_string(),
        })?;
        self.clock
            .local_to_timestamp(date.and_time(time))
            .ok_or_else(|| ValidationError::InvalidInput {
                field: "time",
                value: time_input.to_string(),
            })
    }

    fn resolve_title(&self, title: &str) -> String {
        if title.trim().is_empty() {
            self.placeholder.clone()
        } else {
            title.to_string()
        }
    }
}
