//! Key bindings for the countdown widget.
//!
//! A [`Binding`] pairs one or more key presses with the short help text shown
//! under the widget. [`CountdownKeyMap`] holds every action the widget
//! understands.
//!
//! ```rust
//! use countdown_widget::key::{Binding, CountdownKeyMap};
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let keys = CountdownKeyMap::default();
//! let press = KeyMsg { key: KeyCode::Char('r'), modifiers: KeyModifiers::NONE };
//! assert!(keys.reset.matches(&press));
//! assert!(!keys.save.matches(&press));
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// One key press, a key code plus modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

/// Help text for a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// How the key is written, e.g. `"enter"`.
    pub key: String,
    /// What it does.
    pub desc: String,
}

/// A set of key presses bound to one action.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// A binding for the given presses.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help text.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Presses bound to this action.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Help text.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Whether the binding currently reacts to input.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Whether `msg` triggers this binding.
    ///
    /// Shift is ignored for character keys, since terminals already report
    /// the shifted character.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if !self.enabled() {
            return false;
        }
        self.keys.iter().any(|press| {
            let held = match msg.key {
                KeyCode::Char(_) => msg.modifiers.difference(KeyModifiers::SHIFT),
                _ => msg.modifiers,
            };
            press.code == msg.key && press.modifiers == held
        })
    }
}

/// The widget's actions.
#[derive(Debug, Clone)]
pub struct CountdownKeyMap {
    /// Start a countdown from the form.
    pub start: Binding,
    /// Clear the countdown.
    pub reset: Binding,
    /// Copy the share link.
    pub copy_link: Binding,
    /// Save the countdown.
    pub save: Binding,
    /// Leave the program.
    pub quit: Binding,
}

impl Default for CountdownKeyMap {
    fn default() -> Self {
        Self {
            start: Binding::new(vec![KeyCode::Enter]).with_help("enter", "start"),
            reset: Binding::new(vec![KeyCode::Char('r')]).with_help("r", "reset"),
            copy_link: Binding::new(vec![KeyCode::Char('c')]).with_help("c", "copy link"),
            save: Binding::new(vec![KeyCode::Char('s')]).with_help("s", "save"),
            quit: Binding::new(vec![
                KeyPress::from(KeyCode::Char('q')),
                KeyPress::from((KeyCode::Char('c'), KeyModifiers::CONTROL)),
            ])
            .with_help("q", "quit"),
        }
    }
}

impl CountdownKeyMap {
    /// Bindings shown in the help line, in display order.
    pub fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.start,
            &self.reset,
            &self.copy_link,
            &self.save,
            &self.quit,
        ]
    }

    /// The help line, e.g. `enter start • r reset`.
    pub fn help_line(&self) -> String {
        self.short_help()
            .into_iter()
            .filter(|b| b.enabled())
            .map(|b| format!("{} {}", b.help().key, b.help().desc))
            .collect::<Vec<_>>()
            .join(" • ")
    }
}
