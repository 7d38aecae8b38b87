#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/countdown-widget/")]

//! # countdown-widget
//!
//! A countdown timer widget for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! terminal applications. Pick a target date and time, give it a title, and
//! the widget counts down to it once a second, with a progress bar, a saved
//! countdown that survives restarts, and share links that recreate the
//! countdown elsewhere.
//!
//! ## Overview
//!
//! The crate is split into a pure state machine and the widget that drives it:
//!
//! - [`engine`] holds the target, the start instant and the title, and derives
//!   remaining time and progress from a [`Clock`](clock::Clock) reading. It
//!   never performs I/O.
//! - [`countdown`] is the Elm-architecture widget. It owns the one-second
//!   [`driver`], turns user actions into engine calls, and talks to its
//!   collaborators: a [`store`], a [`clipboard`], a [`location`] and a
//!   [`render`]er.
//!
//! Every collaborator is a trait with an in-memory implementation, so the
//! whole widget can be exercised in tests with a [`FixedClock`](clock::FixedClock).
//!
//! ## Quick Start
//!
//! ```rust
//! use countdown_widget::prelude::*;
//!
//! let clock = FixedClock::at_local("2024-12-31", "09:00").unwrap();
//! let mut engine = CountdownEngine::new(Box::new(clock.clone()));
//! engine.start("2025-01-01", "10:00", "Launch").unwrap();
//!
//! let frame = DisplayFrame::capture(&engine, clock.now(), Locale::English);
//! assert_eq!(frame.days, "01");
//! assert_eq!(frame.hours, "01");
//! ```
//!
//! ## Share links
//!
//! A running countdown is published as `?date=YYYY-MM-DD&time=HH:MM&title=...`
//! on its [`Location`](location::Location). Loading a widget whose location
//! carries those parameters starts the same countdown.
//!
//! ## Features
//!
//! - `clipboard-support` (default): copy share links to the desktop clipboard.
//!   Without it, copies go through the OSC 52 terminal escape sequence only.
//!
//! ## Logging
//!
//! The crate logs through [`tracing`] and never installs a subscriber.

pub mod clipboard;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod display;
pub mod driver;
pub mod engine;
pub mod error;
pub mod key;
pub mod locale;
pub mod location;
pub mod notice;
pub mod progress;
pub mod record;
pub mod render;
pub mod share;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock, Timestamp};
pub use config::Config;
pub use countdown::Model as Countdown;
pub use engine::{CountdownEngine, CountdownState, Remaining, RemainingTime};
pub use error::{ClipboardError, ConfigError, DeserializationError, StoreError, ValidationError};
pub use progress::Model as Progress;

/// Commonly used types.
///
/// ```rust
/// use countdown_widget::prelude::*;
///
/// let config = Config::default().with_locale(Locale::Vietnamese);
/// assert_eq!(config.placeholder(), "Đếm ngược đến sự kiện");
/// ```
pub mod prelude {
    pub use crate::clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
    pub use crate::clock::{Clock, FixedClock, SystemClock, Timestamp};
    pub use crate::config::Config;
    pub use crate::countdown::Model as Countdown;
    pub use crate::display::DisplayFrame;
    pub use crate::driver::{ActiveDriver, TickMsg as CountdownTickMsg};
    pub use crate::engine::{CountdownEngine, CountdownState, Remaining, RemainingTime};
    pub use crate::key::{Binding, CountdownKeyMap};
    pub use crate::locale::Locale;
    pub use crate::location::{Location, MemoryLocation};
    pub use crate::notice::{Notice, NoticeKind};
    pub use crate::progress::Model as Progress;
    pub use crate::record::PersistedRecord;
    pub use crate::render::{Renderer, TerminalRenderer};
    pub use crate::share::UrlParams;
    pub use crate::store::{FileStore, MemoryStore, PersistenceStore};
}
