//! The countdown widget.
//!
//! [`Model`] wires a [`CountdownEngine`] to its collaborators: a store for the
//! saved countdown, a clipboard for share links, the [`Location`] the
//! countdown is shared under, and a [`Renderer`]. It owns the single
//! [`ActiveDriver`] that ticks a running countdown and the toast notice shown
//! after each action.
//!
//! # Basic Usage
//!
//! ```rust
//! use countdown_widget::clock::FixedClock;
//! use countdown_widget::config::Config;
//! use countdown_widget::countdown::Model;
//! use countdown_widget::location::MemoryLocation;
//! use countdown_widget::store::MemoryStore;
//!
//! let clock = FixedClock::at_local("2024-12-31", "09:00").unwrap();
//! let mut widget = Model::new(Config::default())
//!     .with_clock(Box::new(clock))
//!     .with_store(Box::new(MemoryStore::new()))
//!     .with_location(Box::new(MemoryLocation::default()));
//!
//! widget.set_date_input("2025-01-01");
//! widget.set_time_input("10:00");
//! widget.set_title_input("Launch");
//! let _tick = widget.start();
//!
//! assert!(widget.engine().state().running);
//! assert!(widget.view().contains("Launch"));
//! ```
//!
//! # bubbletea-rs Integration
//!
//! `Model` implements the runtime's model trait with the system clock,
//! clipboard and a file store. Inside a larger application, forward messages
//! to it the same way the runtime would:
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use countdown_widget::countdown::Model as Countdown;
//!
//! struct App {
//!     countdown: Countdown,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let (countdown, cmd) = Countdown::init();
//!         (Self { countdown }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.countdown.view()
//!     }
//! }
//! ```

use std::time::Duration;

use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;
use tracing::{debug, info, warn};

use crate::clipboard::{copy_with_fallback, Clipboard, CopyPath, SystemClipboard};
use crate::clock::{Clock, SystemClock, Timestamp};
use crate::config::Config;
use crate::display::DisplayFrame;
use crate::driver::{ActiveDriver, NoticeExpiredMsg, TickMsg};
use crate::engine::{CountdownEngine, Remaining};
use crate::error::{DeserializationError, ValidationError};
use crate::key::CountdownKeyMap;
use crate::locale::{Locale, Message};
use crate::location::{Location, MemoryLocation};
use crate::notice::{Notice, NoticeKind};
use crate::record::PersistedRecord;
use crate::render::{Renderer, TerminalRenderer};
use crate::share::share_url;
use crate::store::{FileStore, MemoryStore, PersistenceStore};

/// Form fields that can be edited from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Target date, `YYYY-MM-DD`.
    Date,
    /// Target time, `HH:MM`.
    Time,
    /// Countdown title.
    Title,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Date => Field::Time,
            Field::Time => Field::Title,
            Field::Title => Field::Date,
        }
    }
}

/// The countdown widget.
#[derive(Debug)]
pub struct Model {
    engine: CountdownEngine,
    config: Config,
    date_input: String,
    time_input: String,
    title_input: String,
    started_inputs: Option<(String, String)>,
    editing: Option<Field>,
    driver: ActiveDriver,
    store: Box<dyn PersistenceStore>,
    clipboard: Box<dyn Clipboard>,
    renderer: Box<dyn Renderer>,
    location: Box<dyn Location>,
    /// Key bindings.
    pub keys: CountdownKeyMap,
    notice: Option<Notice>,
    celebrate_until: Option<Timestamp>,
}

impl Model {
    /// A widget using the system clock and clipboard, a file store and a
    /// terminal renderer, configured by `config`.
    pub fn new(config: Config) -> Self {
        let engine = CountdownEngine::with_placeholder(
            Box::new(SystemClock),
            config.placeholder(),
        );
        let (date_input, time_input) = engine.default_inputs(engine.now());
        Self {
            date_input,
            time_input,
            title_input: String::new(),
            started_inputs: None,
            editing: None,
            driver: ActiveDriver::new(config.tick_interval()),
            store: default_store(&config),
            clipboard: Box::new(SystemClipboard::new()),
            renderer: Box::new(TerminalRenderer::new(config.width)),
            location: Box::new(MemoryLocation::new(config.share_base_url.clone())),
            keys: CountdownKeyMap::default(),
            notice: None,
            celebrate_until: None,
            engine,
            config,
        }
    }

    /// Replaces the clock. The form defaults are recomputed from it.
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.engine = CountdownEngine::with_placeholder(clock, self.config.placeholder());
        let (date, time) = self.engine.default_inputs(self.engine.now());
        self.date_input = date;
        self.time_input = time;
        self
    }

    /// Replaces the store.
    pub fn with_store(mut self, store: Box<dyn PersistenceStore>) -> Self {
        self.store = store;
        self
    }

    /// Replaces the clipboard.
    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Replaces the renderer.
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Replaces the location.
    pub fn with_location(mut self, location: Box<dyn Location>) -> Self {
        self.location = location;
        self
    }

    /// The engine.
    pub fn engine(&self) -> &CountdownEngine {
        &self.engine
    }

    /// The configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The tick driver.
    pub fn driver(&self) -> &ActiveDriver {
        &self.driver
    }

    /// The store.
    pub fn store(&self) -> &dyn PersistenceStore {
        self.store.as_ref()
    }

    /// The location.
    pub fn location(&self) -> &dyn Location {
        self.location.as_ref()
    }

    /// The notice currently on screen, if any.
    pub fn notice(&self) -> Option<&Notice> {
        let now = self.engine.now();
        self.notice.as_ref().filter(|n| n.visible_at(now))
    }

    /// Whether the completion celebration is playing.
    pub fn is_celebrating(&self) -> bool {
        let now = self.engine.now();
        self.celebrate_until.is_some_and(|until| now < until)
    }

    /// Date field.
    pub fn date_input(&self) -> &str {
        &self.date_input
    }

    /// Time field.
    pub fn time_input(&self) -> &str {
        &self.time_input
    }

    /// Title field.
    pub fn title_input(&self) -> &str {
        &self.title_input
    }

    /// Sets the date field.
    pub fn set_date_input(&mut self, value: impl Into<String>) {
        self.date_input = value.into();
    }

    /// Sets the time field.
    pub fn set_time_input(&mut self, value: impl Into<String>) {
        self.time_input = value.into();
    }

    /// Sets the title field.
    pub fn set_title_input(&mut self, value: impl Into<String>) {
        self.title_input = value.into();
    }

    /// The field being edited, if any.
    pub fn editing(&self) -> Option<Field> {
        self.editing
    }

    /// Restores a countdown at startup.
    ///
    /// A saved record still in the future is resumed; expired or unreadable
    /// records are dropped quietly. URL parameters are applied afterwards and
    /// start a countdown of their own, so a shared link wins over a saved
    /// countdown.
    pub fn load(&mut self) -> Option<Cmd> {
        // Resuming rewrites the location, so the shared link is read first.
        let params = self.location.params();
        let resumed = self.resume_saved();
        match self.engine.from_url_parameters(&params) {
            Some(inputs) => {
                debug!("Starting countdown from URL parameters");
                self.date_input = inputs.date;
                self.time_input = inputs.time;
                self.title_input = inputs.title;
                self.start().or(resumed)
            }
            None => resumed,
        }
    }

    /// Starts a countdown from the form.
    ///
    /// On success the previous driver is replaced, the location is rewritten
    /// with the share parameters, and a success notice is shown. On failure an
    /// error notice is shown and nothing else changes.
    pub fn start(&mut self) -> Option<Cmd> {
        let date = self.date_input.clone();
        let time = self.time_input.clone();
        match self.engine.start(&date, &time, &self.title_input) {
            Ok(state) => {
                info!("Countdown started: {:?} until {:?}", state.title, state.target_timestamp);
                let cmd = self.begin(date, time);
                self.notify(NoticeKind::Success, Message::Started);
                Some(cmd)
            }
            Err(err) => {
                debug!("Refusing to start countdown: {}", err);
                let message = match err {
                    ValidationError::MissingInput => Message::MissingInput,
                    ValidationError::InvalidInput { .. } => Message::InvalidInput,
                    ValidationError::NotInFuture => Message::NotInFuture,
                };
                self.notify(NoticeKind::Error, message)
            }
        }
    }

    /// Advances the countdown by one driver tick.
    ///
    /// When the target is reached the driver is cancelled, a completion notice
    /// is shown and the celebration starts.
    pub fn on_tick(&mut self) -> Option<Cmd> {
        let now = self.engine.now();
        self.expire(now);
        if !self.engine.state().running {
            return None;
        }

        match self.engine.tick(now) {
            Remaining::Running(_) => self.driver.next(),
            Remaining::Completed => {
                info!("Countdown complete: {:?}", self.engine.state().title);
                self.driver.cancel();
                self.celebrate_until = Some(now.add_millis(self.config.notice_duration_ms as i64));
                self.notify(NoticeKind::Success, Message::Completed)
            }
        }
    }

    /// Clears the countdown, restores the form defaults and clears the
    /// location's parameters. The saved record is left alone.
    pub fn reset(&mut self) -> Option<Cmd> {
        self.driver.cancel();
        self.engine.reset();
        let (date, time) = self.engine.default_inputs(self.engine.now());
        self.date_input = date;
        self.time_input = time;
        self.title_input = self.engine.placeholder().to_string();
        self.started_inputs = None;
        self.celebrate_until = None;
        self.location.replace_query("");
        info!("Countdown reset");
        self.notify(NoticeKind::Info, Message::Reset)
    }

    /// Copies a share link for the current countdown.
    pub fn copy_share_link(&mut self) -> Option<Cmd> {
        let Some(url) = self.share_link() else {
            return self.notify(NoticeKind::Error, Message::NothingToShare);
        };
        match copy_with_fallback(self.clipboard.as_mut(), &url) {
            Ok(path) => {
                if path == CopyPath::Fallback {
                    debug!("Share link copied through fallback clipboard");
                }
                self.notify(NoticeKind::Success, Message::LinkCopied)
            }
            Err(err) => {
                warn!("Could not copy share link: {}", err);
                self.notify(NoticeKind::Error, Message::CopyFailed)
            }
        }
    }

    /// The share link for the current countdown, if one has been started.
    pub fn share_link(&self) -> Option<String> {
        let (date, time) = self.started_inputs.as_ref()?;
        if !self.engine.has_target() {
            return None;
        }
        let params = self.engine.to_url_parameters(date, time);
        Some(share_url(&self.location.base_url(), &params))
    }

    /// Writes the current countdown to the store.
    pub fn save(&mut self) -> Option<Cmd> {
        let record = self
            .started_inputs
            .as_ref()
            .and_then(|(date, time)| self.engine.serialize(date, time));
        let Some(record) = record else {
            return self.notify(NoticeKind::Error, Message::NothingToSave);
        };

        let written = record
            .to_json()
            .and_then(|json| self.store.save(&self.config.storage_key, &json));
        match written {
            Ok(()) => {
                info!("Countdown saved under {}", self.config.storage_key);
                self.notify(NoticeKind::Success, Message::Saved)
            }
            Err(err) => {
                warn!("Could not save countdown: {}", err);
                self.notify(NoticeKind::Error, Message::SaveFailed)
            }
        }
    }

    /// Handles a runtime message.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(tick) = msg.downcast_ref::<TickMsg>() {
            if !self.driver.accepts(tick) {
                debug!("Dropping stale tick from driver {}", tick.id);
                return None;
            }
            return self.on_tick();
        }

        if let Some(expired) = msg.downcast_ref::<NoticeExpiredMsg>() {
            if expired.id != self.driver.id() {
                return None;
            }
            return self.on_notice_expired();
        }

        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key);
        }

        None
    }

    /// Renders the form, the countdown, the current notice and the key help.
    pub fn view(&self) -> String {
        let now = self.engine.now();
        let frame = DisplayFrame::capture(&self.engine, now, self.config.locale)
            .with_celebration(self.is_celebrating());

        let mut sections = vec![self.form_view(), self.renderer.render(&frame)];
        if let Some(notice) = self.notice() {
            sections.push(self.renderer.render_notice(notice));
        }
        sections.push(
            Style::new()
                .faint(true)
                .render(&self.keys.help_line()),
        );
        sections.join("\n\n")
    }

    fn handle_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        let ctrl_c =
            key.key == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl_c || (self.editing.is_none() && self.keys.quit.matches(key)) {
            return Some(bubbletea_rs::quit());
        }

        if let Some(field) = self.editing {
            match key.key {
                KeyCode::Enter => {
                    self.editing = None;
                    return self.start();
                }
                KeyCode::Esc => self.editing = None,
                KeyCode::Tab => self.editing = Some(field.next()),
                KeyCode::Backspace => {
                    self.field_mut(field).pop();
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.field_mut(field).push(c);
                }
                _ => {}
            }
            return None;
        }

        if key.key == KeyCode::Tab {
            self.editing = Some(Field::Date);
            None
        } else if self.keys.start.matches(key) {
            self.start()
        } else if self.keys.reset.matches(key) {
            self.reset()
        } else if self.keys.copy_link.matches(key) {
            self.copy_share_link()
        } else if self.keys.save.matches(key) {
            self.save()
        } else {
            None
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Date => &mut self.date_input,
            Field::Time => &mut self.time_input,
            Field::Title => &mut self.title_input,
        }
    }

    fn form_view(&self) -> String {
        let [date_label, time_label, title_label] = match self.config.locale {
            Locale::English => ["Date", "Time", "Title"],
            Locale::Vietnamese => ["Ngày", "Giờ", "Tiêu đề"],
        };
        let active = Style::new().bold(true).foreground(Color::from("#EE6FF8"));
        let idle = Style::new().foreground(Color::from("#dddddd"));

        [
            (Field::Date, date_label, &self.date_input),
            (Field::Time, time_label, &self.time_input),
            (Field::Title, title_label, &self.title_input),
        ]
        .iter()
        .map(|(field, label, value)| {
            let style = if self.editing == Some(*field) {
                &active
            } else {
                &idle
            };
            style.render(&format!("{label}: [{value}]"))
        })
        .collect::<Vec<_>>()
        .join("  ")
    }

    fn resume_saved(&mut self) -> Option<Cmd> {
        let json = match self.store.load(&self.config.storage_key) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(err) => {
                warn!("Could not read saved countdown: {}", err);
                return None;
            }
        };

        let restored = PersistedRecord::from_json(&json).and_then(|record| {
            self.engine.deserialize(&record)?;
            Ok(record)
        });
        match restored {
            Ok(record) => {
                info!("Resuming saved countdown {:?}", record.title);
                self.date_input = record.date.clone();
                self.time_input = record.time.clone();
                self.title_input = record.title;
                let cmd = self.begin(record.date, record.time);
                self.notify(NoticeKind::Success, Message::Started);
                Some(cmd)
            }
            Err(DeserializationError::Expired) => {
                debug!("Discarding expired saved countdown");
                None
            }
            Err(err) => {
                debug!("Discarding saved countdown: {}", err);
                None
            }
        }
    }

    /// Records the inputs of a freshly started countdown, publishes them to
    /// the location and installs a new driver.
    fn begin(&mut self, date: String, time: String) -> Cmd {
        self.celebrate_until = None;
        let params = self.engine.to_url_parameters(&date, &time);
        self.location.replace_query(&params.to_query_string());
        self.started_inputs = Some((date, time));
        self.driver.install()
    }

    fn notify(&mut self, kind: NoticeKind, message: Message) -> Option<Cmd> {
        let now = self.engine.now();
        self.notice = Some(Notice::new(
            kind,
            message,
            self.config.locale,
            now,
            self.config.notice_duration_ms,
        ));
        self.expiry_cmd(self.config.notice_duration_ms)
    }

    /// While the driver runs, expiry rides on its ticks.
    fn expiry_cmd(&self, after_ms: u64) -> Option<Cmd> {
        if self.driver.is_active() {
            None
        } else {
            Some(self.driver.expire_notice_after(Duration::from_millis(after_ms)))
        }
    }

    fn on_notice_expired(&mut self) -> Option<Cmd> {
        let now = self.engine.now();
        self.expire(now);

        let pending = [
            self.notice.as_ref().map(|n| n.expires_at),
            self.celebrate_until,
        ]
        .into_iter()
        .flatten()
        .map(|until| until.millis_since(now))
        .max()?;
        self.expiry_cmd(pending.max(1) as u64)
    }

    fn expire(&mut self, now: Timestamp) {
        if self.notice.as_ref().is_some_and(|n| !n.visible_at(now)) {
            self.notice = None;
        }
        if self.celebrate_until.is_some_and(|until| now >= until) {
            self.celebrate_until = None;
        }
    }
}

fn default_store(config: &Config) -> Box<dyn PersistenceStore> {
    if let Some(dir) = &config.storage_dir {
        return Box::new(FileStore::new(dir.clone()));
    }
    match FileStore::in_data_dir() {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!("Saved countdowns will not persist: {}", err);
            Box::new(MemoryStore::new())
        }
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let mut model = Model::new(Config::default());
        let cmd = model.load();
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::clock::{FixedClock, MS_PER_DAY, MS_PER_HOUR, MS_PER_SECOND};
    use crate::error::{ClipboardError, StoreError};
    use crate::record::STORAGE_KEY;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, Default)]
    struct SharedClipboard(Arc<Mutex<MemoryClipboard>>);

    impl SharedClipboard {
        fn rejecting(primary: bool, fallback: bool) -> Self {
            Self(Arc::new(Mutex::new(MemoryClipboard {
                reject_primary: primary,
                reject_fallback: fallback,
                ..MemoryClipboard::default()
            })))
        }

        fn copies(&self) -> Vec<(CopyPath, String)> {
            self.0.lock().unwrap().copies.clone()
        }
    }

    impl Clipboard for SharedClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.0.lock().unwrap().write_text(text)
        }

        fn write_text_fallback(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.0.lock().unwrap().write_text_fallback(text)
        }
    }

    #[derive(Debug)]
    struct BrokenStore;

    impl PersistenceStore for BrokenStore {
        fn load(&self, _: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::NoDirectory)
        }

        fn save(&mut self, _: &str, _: &str) -> Result<(), StoreError> {
            Err(StoreError::NoDirectory)
        }

        fn remove(&mut self, _: &str) -> Result<(), StoreError> {
            Err(StoreError::NoDirectory)
        }
    }

    struct Fixture {
        model: Model,
        clock: FixedClock,
        clipboard: SharedClipboard,
    }

    fn fixture_with(store: Box<dyn PersistenceStore>, location: MemoryLocation) -> Fixture {
        let clock = FixedClock::at_local("2024-12-31", "09:00").unwrap();
        let clipboard = SharedClipboard::default();
        let model = Model::new(Config::default())
            .with_clock(Box::new(clock.clone()))
            .with_store(store)
            .with_clipboard(Box::new(clipboard.clone()))
            .with_location(Box::new(location));
        Fixture {
            model,
            clock,
            clipboard,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(Box::new(MemoryStore::new()), MemoryLocation::default())
    }

    fn start_launch(model: &mut Model) -> Option<Cmd> {
        model.set_date_input("2025-01-01");
        model.set_time_input("10:00");
        model.set_title_input("Launch");
        model.start()
    }

    fn notice_message(model: &Model) -> Option<Message> {
        model.notice().map(|n| n.message)
    }

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }) as Msg
    }

    #[test]
    fn test_new_widget_has_form_defaults() {
        let f = fixture();
        assert_eq!(f.model.date_input(), "2024-12-31");
        assert_eq!(f.model.time_input(), "10:00");
        assert!(!f.model.engine().has_target());
        assert!(!f.model.driver().is_active());
        assert!(f.model.notice().is_none());
    }

    #[test]
    fn test_start_installs_driver_and_publishes_location() {
        let mut f = fixture();
        assert!(start_launch(&mut f.model).is_some());

        assert!(f.model.engine().state().running);
        assert!(f.model.driver().is_active());
        assert_eq!(notice_message(&f.model), Some(Message::Started));
        assert_eq!(
            f.model.location().query(),
            "date=2025-01-01&time=10%3A00&title=Launch"
        );
    }

    #[test]
    fn test_start_rejected_leaves_state_untouched() {
        let mut f = fixture();
        start_launch(&mut f.model);
        let before = f.model.engine().state().clone();
        let tick = f.model.driver().current_tick();
        let query = f.model.location().query();

        f.model.set_date_input("2020-01-01");
        f.model.set_time_input("00:00");
        f.model.set_title_input("Past");
        assert!(f.model.start().is_none());

        assert_eq!(f.model.engine().state(), &before);
        assert!(f.model.driver().accepts(&tick));
        assert_eq!(f.model.location().query(), query);
        assert_eq!(notice_message(&f.model), Some(Message::NotInFuture));
    }

    #[test]
    fn test_start_with_missing_input_schedules_notice_expiry() {
        let mut f = fixture();
        f.model.set_date_input("");
        assert!(f.model.start().is_some());
        assert_eq!(notice_message(&f.model), Some(Message::MissingInput));
        assert!(!f.model.driver().is_active());

        f.model.set_date_input("31/12/2025");
        f.model.start();
        assert_eq!(notice_message(&f.model), Some(Message::InvalidInput));
    }

    #[test]
    fn test_restart_supersedes_previous_driver() {
        let mut f = fixture();
        start_launch(&mut f.model);
        let first = f.model.driver().current_tick();

        f.model.set_time_input("11:00");
        f.model.start();
        assert!(!f.model.driver().accepts(&first));
        assert!(f.model.update(Box::new(first) as Msg).is_none());
    }

    #[test]
    fn test_tick_reschedules_while_running() {
        let mut f = fixture();
        start_launch(&mut f.model);
        f.clock.advance(MS_PER_SECOND);

        let tick = f.model.driver().current_tick();
        assert!(f.model.update(Box::new(tick) as Msg).is_some());
        assert!(f.model.engine().state().running);
    }

    #[test]
    fn test_notice_expires_on_ticks() {
        let mut f = fixture();
        start_launch(&mut f.model);
        assert!(f.model.notice().is_some());

        f.clock.advance(3 * MS_PER_SECOND);
        f.model.on_tick();
        assert!(f.model.notice().is_none());
        assert!(f.model.notice.is_none());
    }

    #[test]
    fn test_completion_cancels_driver_and_celebrates() {
        let mut f = fixture();
        f.model.set_date_input("2024-12-31");
        f.model.set_time_input("09:00:02");
        f.model.start();

        f.clock.advance(2 * MS_PER_SECOND);
        let tick = f.model.driver().current_tick();
        let cmd = f.model.update(Box::new(tick.clone()) as Msg);

        assert!(cmd.is_some(), "completion schedules the notice expiry");
        assert!(!f.model.driver().is_active());
        assert!(!f.model.engine().state().running);
        assert!(f.model.engine().has_target());
        assert_eq!(notice_message(&f.model), Some(Message::Completed));
        assert!(f.model.is_celebrating());
        assert!(f.model.view().contains("🎉"));

        // Further ticks from the cancelled chain are ignored.
        assert!(f.model.update(Box::new(tick) as Msg).is_none());

        f.clock.advance(3 * MS_PER_SECOND);
        let expired = NoticeExpiredMsg {
            id: f.model.driver().id(),
        };
        assert!(f.model.update(Box::new(expired) as Msg).is_none());
        assert!(!f.model.is_celebrating());
        assert!(f.model.notice.is_none());
    }

    #[test]
    fn test_early_notice_expiry_reschedules() {
        let mut f = fixture();
        f.model.save();
        f.clock.advance(2 * MS_PER_SECOND);
        let expired = NoticeExpiredMsg {
            id: f.model.driver().id(),
        };
        assert!(f.model.update(Box::new(expired) as Msg).is_some());
        assert!(f.model.notice().is_some());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut f = fixture();
        start_launch(&mut f.model);
        f.clock.advance(MS_PER_HOUR);
        let tick = f.model.driver().current_tick();

        assert!(f.model.reset().is_some());
        assert!(!f.model.engine().has_target());
        assert!(!f.model.driver().accepts(&tick));
        assert_eq!(f.model.date_input(), "2024-12-31");
        assert_eq!(f.model.time_input(), "11:00");
        assert_eq!(f.model.title_input(), "Countdown to the event");
        assert_eq!(f.model.location().query(), "");
        assert_eq!(notice_message(&f.model), Some(Message::Reset));

        let state = f.model.engine().state().clone();
        f.model.reset();
        assert_eq!(f.model.engine().state(), &state);
        assert!(f.model.share_link().is_none());
    }

    #[test]
    fn test_copy_share_link() {
        let mut f = fixture();
        f.model.copy_share_link();
        assert_eq!(notice_message(&f.model), Some(Message::NothingToShare));
        assert!(f.clipboard.copies().is_empty());

        f.model.set_date_input("2025-01-01");
        f.model.set_time_input("10:00");
        f.model.set_title_input("New Year");
        f.model.start();
        f.model.copy_share_link();

        assert_eq!(notice_message(&f.model), Some(Message::LinkCopied));
        assert_eq!(
            f.clipboard.copies(),
            vec![(
                CopyPath::Primary,
                "http://localhost:5173/?date=2025-01-01&time=10%3A00&title=New%2520Year"
                    .to_string()
            )]
        );
    }

    #[test]
    fn test_copy_uses_started_inputs_not_edited_form() {
        let mut f = fixture();
        start_launch(&mut f.model);
        f.model.set_date_input("2030-01-01");
        let link = f.model.share_link().unwrap();
        assert!(link.contains("date=2025-01-01"));
    }

    #[test]
    fn test_copy_falls_back_then_fails() {
        let mut f = fixture();
        let fallback = SharedClipboard::rejecting(true, false);
        f.model = f.model.with_clipboard(Box::new(fallback.clone()));
        start_launch(&mut f.model);
        f.model.copy_share_link();
        assert_eq!(notice_message(&f.model), Some(Message::LinkCopied));
        assert_eq!(fallback.copies()[0].0, CopyPath::Fallback);

        f.model = f
            .model
            .with_clipboard(Box::new(SharedClipboard::rejecting(true, true)));
        f.model.copy_share_link();
        assert_eq!(notice_message(&f.model), Some(Message::CopyFailed));
    }

    #[test]
    fn test_save_writes_record() {
        let mut f = fixture();
        f.model.save();
        assert_eq!(notice_message(&f.model), Some(Message::NothingToSave));
        assert_eq!(f.model.store().load(STORAGE_KEY).unwrap(), None);

        start_launch(&mut f.model);
        f.model.save();
        assert_eq!(notice_message(&f.model), Some(Message::Saved));

        let json = f.model.store().load(STORAGE_KEY).unwrap().unwrap();
        let record = PersistedRecord::from_json(&json).unwrap();
        assert_eq!(record.date, "2025-01-01");
        assert_eq!(record.time, "10:00");
        assert_eq!(record.title, "Launch");
        assert_eq!(
            Some(record.target_timestamp),
            f.model.engine().state().target_timestamp
        );
    }

    #[test]
    fn test_save_failure_is_reported() {
        let mut f = fixture_with(Box::new(BrokenStore), MemoryLocation::default());
        start_launch(&mut f.model);
        f.model.save();
        assert_eq!(notice_message(&f.model), Some(Message::SaveFailed));
    }

    fn saved(target_offset_ms: i64) -> MemoryStore {
        let clock = FixedClock::at_local("2024-12-31", "09:00").unwrap();
        let record = PersistedRecord {
            date: "2025-01-01".to_string(),
            time: "10:00".to_string(),
            title: "Saved".to_string(),
            target_timestamp: clock.now().add_millis(target_offset_ms),
        };
        MemoryStore::with_slot(STORAGE_KEY, record.to_json().unwrap())
    }

    #[test]
    fn test_load_resumes_saved_countdown() {
        let mut f = fixture_with(
            Box::new(saved(MS_PER_DAY + MS_PER_HOUR)),
            MemoryLocation::default(),
        );
        assert!(f.model.load().is_some());
        assert!(f.model.engine().state().running);
        assert_eq!(f.model.engine().state().title, "Saved");
        assert_eq!(f.model.title_input(), "Saved");
        assert!(f.model.location().query().starts_with("date=2025-01-01"));
    }

    #[test]
    fn test_load_discards_expired_and_malformed_records() {
        let mut f = fixture_with(Box::new(saved(-MS_PER_HOUR)), MemoryLocation::default());
        assert!(f.model.load().is_none());
        assert!(!f.model.engine().has_target());
        assert!(f.model.notice().is_none());

        let garbage = MemoryStore::with_slot(STORAGE_KEY, r#"{"date":"2025-01-01"}"#);
        let mut f = fixture_with(Box::new(garbage), MemoryLocation::default());
        assert!(f.model.load().is_none());
        assert!(!f.model.engine().has_target());

        let mut f = fixture_with(Box::new(BrokenStore), MemoryLocation::default());
        assert!(f.model.load().is_none());
    }

    #[test]
    fn test_load_from_url_wins_over_saved() {
        let location = MemoryLocation::from_url(
            "http://localhost:5173/?date=2025-06-01&time=12%3A00&title=Summer%2520Party",
        );
        let mut f = fixture_with(Box::new(saved(MS_PER_DAY + MS_PER_HOUR)), location);
        assert!(f.model.load().is_some());
        assert_eq!(f.model.engine().state().title, "Summer Party");
        assert_eq!(f.model.date_input(), "2025-06-01");
        assert_eq!(f.model.time_input(), "12:00");
        assert_eq!(
            f.model.location().query(),
            "date=2025-06-01&time=12%3A00&title=Summer%2520Party"
        );
    }

    #[test]
    fn test_load_from_url_in_past_keeps_saved_driver() {
        let location =
            MemoryLocation::from_url("http://localhost:5173/?date=2020-01-01&time=00%3A00");
        let mut f = fixture_with(Box::new(saved(MS_PER_DAY + MS_PER_HOUR)), location);
        assert!(f.model.load().is_some());
        assert_eq!(f.model.engine().state().title, "Saved");
        assert!(f.model.driver().is_active());
        assert_eq!(notice_message(&f.model), Some(Message::NotInFuture));
    }

    #[test]
    fn test_load_without_anything_is_idle() {
        let mut f = fixture();
        assert!(f.model.load().is_none());
        assert!(!f.model.engine().has_target());
    }

    #[test]
    fn test_keyboard_editing_and_actions() {
        let mut f = fixture();
        f.model.update(key(KeyCode::Tab));
        assert_eq!(f.model.editing(), Some(Field::Date));
        f.model.update(key(KeyCode::Tab));
        f.model.update(key(KeyCode::Tab));
        assert_eq!(f.model.editing(), Some(Field::Title));
        for c in "Rocket".chars() {
            f.model.update(key(KeyCode::Char(c)));
        }
        f.model.update(key(KeyCode::Backspace));
        assert_eq!(f.model.title_input(), "Rocke");

        // Enter leaves the form and starts the countdown.
        assert!(f.model.update(key(KeyCode::Enter)).is_some());
        assert_eq!(f.model.editing(), None);
        assert_eq!(f.model.engine().state().title, "Rocke");

        f.model.update(key(KeyCode::Char('s')));
        assert_eq!(notice_message(&f.model), Some(Message::Saved));
        f.model.update(key(KeyCode::Char('c')));
        assert_eq!(notice_message(&f.model), Some(Message::LinkCopied));
        f.model.update(key(KeyCode::Char('r')));
        assert_eq!(notice_message(&f.model), Some(Message::Reset));
    }

    #[test]
    fn test_action_letters_are_typed_while_editing() {
        let mut f = fixture();
        f.model.update(key(KeyCode::Tab));
        f.model.update(key(KeyCode::Esc));
        assert_eq!(f.model.editing(), None);

        f.model.set_title_input("");
        f.model.update(key(KeyCode::Tab));
        f.model.update(key(KeyCode::Tab));
        f.model.update(key(KeyCode::Tab));
        f.model.update(key(KeyCode::Char('r')));
        f.model.update(key(KeyCode::Char('s')));
        assert_eq!(f.model.title_input(), "rs");
        assert!(f.model.notice().is_none());
    }

    #[test]
    fn test_view_shows_countdown_and_notice() {
        let mut f = fixture();
        start_launch(&mut f.model);
        f.clock.advance(2 * MS_PER_SECOND);
        let out = String::from_utf8(strip_ansi_escapes::strip(f.model.view())).unwrap();
        assert!(out.contains("Date: [2025-01-01]"));
        assert!(out.contains("Launch"));
        assert!(out.contains("1 days, 0 hours, 59 minutes, 58 seconds"));
        assert!(out.contains("Countdown started!"));
        assert!(out.contains("enter start"));
    }

    #[test]
    fn test_vietnamese_widget() {
        let clock = FixedClock::at_local("2024-12-31", "09:00").unwrap();
        let mut model = Model::new(Config::default().with_locale(Locale::Vietnamese))
            .with_clock(Box::new(clock))
            .with_store(Box::new(MemoryStore::new()))
            .with_location(Box::new(MemoryLocation::default()));
        model.set_title_input("");
        model.start();
        assert_eq!(model.engine().state().title, "Đếm ngược đến sự kiện");
        assert_eq!(model.notice().unwrap().text, "Bộ đếm ngược đã bắt đầu!");
    }
}
