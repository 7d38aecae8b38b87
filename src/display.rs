//! The values a renderer needs to draw one frame.

use crate::clock::Timestamp;
use crate::engine::{CountdownEngine, Remaining};
use crate::locale::Locale;

/// Everything the countdown shows at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFrame {
    /// Countdown title.
    pub title: String,
    /// Days, zero-padded to two digits; longer values are kept whole.
    pub days: String,
    /// Hours, two digits.
    pub hours: String,
    /// Minutes, two digits.
    pub minutes: String,
    /// Seconds, two digits.
    pub seconds: String,
    /// Labels for the four units.
    pub unit_labels: [&'static str; 4],
    /// Long-form remaining time, or the finished text.
    pub remaining_text: String,
    /// Absolute target date-time.
    pub target_text: String,
    /// Elapsed fraction in `[0, 1]`.
    pub progress: f64,
    /// The countdown has reached its target.
    pub completed: bool,
    /// The completion celebration is playing.
    pub celebrating: bool,
}

impl DisplayFrame {
    /// The frame shown when no countdown is set.
    pub fn cleared(title: &str, locale: Locale) -> Self {
        Self {
            title: title.to_string(),
            days: pad2(0),
            hours: pad2(0),
            minutes: pad2(0),
            seconds: pad2(0),
            unit_labels: locale.unit_labels(),
            remaining_text: locale.empty_remaining().to_string(),
            target_text: locale.empty_target().to_string(),
            progress: 0.0,
            completed: false,
            celebrating: false,
        }
    }

    /// The frame for `engine` at `now`.
    pub fn capture(engine: &CountdownEngine, now: Timestamp, locale: Locale) -> Self {
        let state = engine.state();
        let Some(target) = state.target_timestamp else {
            return Self::cleared(&state.title, locale);
        };

        let target_text = engine
            .clock()
            .timestamp_to_local(target)
            .map(|local| locale.target_sentence(local))
            .unwrap_or_else(|| locale.empty_target().to_string());

        match engine.remaining(now) {
            Remaining::Running(r) => Self {
                title: state.title.clone(),
                days: pad2(r.days),
                hours: pad2(r.hours),
                minutes: pad2(r.minutes),
                seconds: pad2(r.seconds),
                unit_labels: locale.unit_labels(),
                remaining_text: locale.remaining_sentence(&r),
                target_text,
                progress: engine.progress_fraction(now),
                completed: false,
                celebrating: false,
            },
            Remaining::Completed => Self {
                remaining_text: locale.finished().to_string(),
                target_text,
                progress: 1.0,
                completed: true,
                ..Self::cleared(&state.title, locale)
            },
        }
    }

    /// Marks the frame as celebrating.
    pub fn with_celebration(mut self, celebrating: bool) -> Self {
        self.celebrating = celebrating;
        self
    }
}

/// Zero-pads to two digits without truncating longer values.
pub fn pad2(value: u64) -> String {
    format!("{value:02}")
}
