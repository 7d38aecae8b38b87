//! Clipboard access for share links.
//!
//! Copying has a primary path and a fallback path. The widget tries the
//! primary path first and only falls back when it is rejected, reporting a
//! single success/failure outcome to the user either way.
//!
//! [`SystemClipboard`] uses the native clipboard (behind the
//! `clipboard-support` feature) and falls back to the OSC 52 terminal escape
//! sequence, which most modern terminal emulators forward to the host
//! clipboard, including over SSH.

use std::fmt;
use std::io::{self, Write};

use base64::Engine as _;
use tracing::{debug, warn};

use crate::error::ClipboardError;

/// Which path a successful copy went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPath {
    /// The primary clipboard accepted the text.
    Primary,
    /// The primary clipboard refused and the fallback succeeded.
    Fallback,
}

/// A clipboard that can receive text.
pub trait Clipboard: fmt::Debug + Send {
    /// Writes `text` through the preferred mechanism.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Writes `text` through a secondary mechanism, used when
    /// [`write_text`](Self::write_text) fails.
    fn write_text_fallback(&mut self, text: &str) -> Result<(), ClipboardError> {
        let _ = text;
        Err(ClipboardError::Unavailable("no fallback clipboard".to_string()))
    }
}

/// Copies `text`, trying the primary path and then the fallback.
///
/// On failure the error from the fallback is returned.
pub fn copy_with_fallback(
    clipboard: &mut dyn Clipboard,
    text: &str,
) -> Result<CopyPath, ClipboardError> {
    match clipboard.write_text(text) {
        Ok(()) => Ok(CopyPath::Primary),
        Err(primary) => {
            debug!("Primary clipboard rejected copy: {}", primary);
            match clipboard.write_text_fallback(text) {
                Ok(()) => Ok(CopyPath::Fallback),
                Err(fallback) => {
                    warn!("Clipboard copy failed: {}; fallback: {}", primary, fallback);
                    Err(fallback)
                }
            }
        }
    }
}

/// Builds the OSC 52 sequence that sets the system clipboard to `text`.
pub fn osc52_sequence(text: &str) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{payload}\x07")
}

/// The desktop clipboard, with an OSC 52 fallback written to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    /// A handle to the system clipboard.
    pub fn new() -> Self {
        Self
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        #[cfg(feature = "clipboard-support")]
        {
            use clipboard::{ClipboardContext, ClipboardProvider};
            let mut ctx: ClipboardContext = ClipboardProvider::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            ctx.set_contents(text.to_string())
                .map_err(|e| ClipboardError::Rejected(e.to_string()))
        }
        #[cfg(not(feature = "clipboard-support"))]
        {
            let _ = text;
            Err(ClipboardError::Unavailable(
                "clipboard support not enabled".to_string(),
            ))
        }
    }

    fn write_text_fallback(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|()| stdout.flush())
            .map_err(|e| ClipboardError::Rejected(e.to_string()))
    }
}

/// An in-memory clipboard recording every successful copy.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    /// Texts copied so far, oldest first.
    pub copies: Vec<(CopyPath, String)>,
    /// Reject writes through the primary path.
    pub reject_primary: bool,
    /// Reject writes through the fallback path.
    pub reject_fallback: bool,
}

impl MemoryClipboard {
    /// A clipboard accepting every write.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently copied text.
    pub fn last(&self) -> Option<&str> {
        self.copies.last().map(|(_, text)| text.as_str())
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.reject_primary {
            return Err(ClipboardError::Rejected("primary rejected".to_string()));
        }
        self.copies.push((CopyPath::Primary, text.to_string()));
        Ok(())
    }

    fn write_text_fallback(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.reject_fallback {
            return Err(ClipboardError::Rejected("fallback rejected".to_string()));
        }
        self.copies.push((CopyPath::Fallback, text.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct PrimaryOnly;

    impl Clipboard for PrimaryOnly {
        fn write_text(&mut self, _: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Rejected("nope".to_string()))
        }
    }

    #[test]
    fn test_primary_path() {
        let mut clipboard = MemoryClipboard::new();
        assert_eq!(
            copy_with_fallback(&mut clipboard, "link"),
            Ok(CopyPath::Primary)
        );
        assert_eq!(clipboard.last(), Some("link"));
    }

    #[test]
    fn test_fallback_path() {
        let mut clipboard = MemoryClipboard {
            reject_primary: true,
            ..MemoryClipboard::default()
        };
        assert_eq!(
            copy_with_fallback(&mut clipboard, "link"),
            Ok(CopyPath::Fallback)
        );
        assert_eq!(clipboard.copies, vec![(CopyPath::Fallback, "link".to_string())]);
    }

    #[test]
    fn test_both_paths_fail() {
        let mut clipboard = MemoryClipboard {
            reject_primary: true,
            reject_fallback: true,
            ..MemoryClipboard::default()
        };
        assert!(copy_with_fallback(&mut clipboard, "link").is_err());
        assert!(clipboard.copies.is_empty());
    }

    #[test]
    fn test_default_fallback_is_unavailable() {
        let mut clipboard = PrimaryOnly;
        assert!(matches!(
            copy_with_fallback(&mut clipboard, "link"),
            Err(ClipboardError::Unavailable(_))
        ));
    }

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
    }
}
