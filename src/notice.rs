//! Short-lived toast notices.

use crate::clock::Timestamp;
use crate::locale::{Locale, Message};

/// How long a notice stays on screen by default.
pub const DEFAULT_NOTICE_MS: u64 = 3000;

/// Visual category of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Something the user asked for worked.
    Success,
    /// Something the user asked for was refused or failed.
    Error,
    /// Neutral information.
    Info,
}

/// A toast shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Category, drives the colour.
    pub kind: NoticeKind,
    /// What the notice is about.
    pub message: Message,
    /// Localized text.
    pub text: String,
    /// Instant after which the notice is hidden.
    pub expires_at: Timestamp,
}

impl Notice {
    /// A localized notice visible for `duration_ms` from `now`.
    pub fn new(
        kind: NoticeKind,
        message: Message,
        locale: Locale,
        now: Timestamp,
        duration_ms: u64,
    ) -> Self {
        Self {
            kind,
            message,
            text: locale.text(message).to_string(),
            expires_at: now.add_millis(duration_ms as i64),
        }
    }

    /// Whether the notice is still visible at `now`.
    pub fn visible_at(&self, now: Timestamp) -> bool {
        now < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_expiry() {
        let now = Timestamp::from_millis(10_000);
        let notice = Notice::new(
            NoticeKind::Success,
            Message::Started,
            Locale::English,
            now,
            DEFAULT_NOTICE_MS,
        );
        assert_eq!(notice.text, "Countdown started!");
        assert!(notice.visible_at(now));
        assert!(notice.visible_at(now.add_millis(2999)));
        assert!(!notice.visible_at(now.add_millis(3000)));
    }
}
