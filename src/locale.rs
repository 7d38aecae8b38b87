//! User-facing strings.
//!
//! Every sentence the widget shows comes from a [`Locale`], so the engine and
//! the host never hard-code display text. English is the default; Vietnamese
//! carries the wording of the web widget.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::engine::RemainingTime;

/// Notices the widget can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    /// Date or time field left empty.
    MissingInput,
    /// Date or time field does not parse.
    InvalidInput,
    /// Target is not in the future.
    NotInFuture,
    /// Countdown started.
    Started,
    /// Countdown reached zero.
    Completed,
    /// Countdown reset.
    Reset,
    /// Share requested with nothing started.
    NothingToShare,
    /// Share link copied.
    LinkCopied,
    /// Both clipboard paths failed.
    CopyFailed,
    /// Save requested with nothing started.
    NothingToSave,
    /// Countdown written to storage.
    Saved,
    /// Storage write failed.
    SaveFailed,
}

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    /// English.
    #[default]
    #[serde(rename = "en")]
    English,
    /// Vietnamese.
    #[serde(rename = "vi")]
    Vietnamese,
}

impl Locale {
    /// Title used when the user leaves the title empty.
    pub fn default_title(self) -> &'static str {
        match self {
            Locale::English => "Countdown to the event",
            Locale::Vietnamese => "Đếm ngược đến sự kiện",
        }
    }

    /// Labels under the days, hours, minutes and seconds units.
    pub fn unit_labels(self) -> [&'static str; 4] {
        match self {
            Locale::English => ["days", "hours", "minutes", "seconds"],
            Locale::Vietnamese => ["ngày", "giờ", "phút", "giây"],
        }
    }

    /// Long-form remaining time, e.g. `1 days, 2 hours, 3 minutes, 4 seconds`.
    pub fn remaining_sentence(self, r: &RemainingTime) -> String {
        let [d, h, m, s] = self.unit_labels();
        format!(
            "{} {d}, {} {h}, {} {m}, {} {s}",
            r.days, r.hours, r.minutes, r.seconds
        )
    }

    /// Remaining-time text once the countdown has finished.
    pub fn finished(self) -> &'static str {
        match self {
            Locale::English => "Finished!",
            Locale::Vietnamese => "Đã kết thúc!",
        }
    }

    /// Absolute target date-time sentence.
    pub fn target_sentence(self, target: NaiveDateTime) -> String {
        match self {
            Locale::English => target.format("%d/%m/%Y %H:%M:%S").to_string(),
            Locale::Vietnamese => target.format("%H:%M:%S %d/%m/%Y").to_string(),
        }
    }

    /// Placeholder shown for the target when no countdown is set.
    pub fn empty_target(self) -> &'static str {
        "--/--/---- --:--:--"
    }

    /// Placeholder shown for the remaining sentence when no countdown is set.
    pub fn empty_remaining(self) -> &'static str {
        "--"
    }

    /// Text of a notice.
    pub fn text(self, message: Message) -> &'static str {
        use Message::*;
        match self {
            Locale::English => match message {
                MissingInput => "Please choose a target date and time!",
                InvalidInput => "The target date or time is not valid!",
                NotInFuture => "The target time must be in the future!",
                Started => "Countdown started!",
                Completed => "Countdown complete! 🎉",
                Reset => "Countdown reset!",
                NothingToShare => "There is no countdown to share yet!",
                LinkCopied => "Share link copied!",
                CopyFailed => "Could not copy the share link!",
                NothingToSave => "There is no countdown to save yet!",
                Saved => "Countdown saved!",
                SaveFailed => "Could not save the countdown!",
            },
            Locale::Vietnamese => match message {
                MissingInput => "Vui lòng chọn ngày và giờ đích!",
                InvalidInput => "Ngày hoặc giờ đích không hợp lệ!",
                NotInFuture => "Thời gian đích phải trong tương lai!",
                Started => "Bộ đếm ngược đã bắt đầu!",
                Completed => "Đếm ngược đã hoàn thành! 🎉",
                Reset => "Đã đặt lại bộ đếm ngược!",
                NothingToShare => "Chưa có bộ đếm ngược để chia sẻ!",
                LinkCopied => "Đã sao chép liên kết chia sẻ!",
                CopyFailed => "Không thể sao chép liên kết chia sẻ!",
                NothingToSave => "Chưa có bộ đếm ngược để lưu!",
                Saved => "Đã lưu bộ đếm ngược!",
                SaveFailed => "Không thể lưu bộ đếm ngược!",
            },
        }
    }
}
