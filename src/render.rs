//! Turning display frames and notices into terminal text.
//!
//! The widget never formats output itself: it hands a [`DisplayFrame`] or a
//! [`Notice`] to a [`Renderer`] and prints whatever comes back. The
//! [`TerminalRenderer`] draws the four time units as a row of cells with their
//! labels underneath, a progress bar, and the remaining and target sentences.

use std::fmt;

use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::display::DisplayFrame;
use crate::notice::{Notice, NoticeKind};
use crate::progress;

/// Success notice colour.
pub const SUCCESS_COLOR: &str = "#10b981";
/// Error notice colour.
pub const ERROR_COLOR: &str = "#ef4444";
/// Info notice colour.
pub const INFO_COLOR: &str = "#3b82f6";
/// Colour of the completion celebration.
pub const CELEBRATION_COLOR: &str = "#fbbf24";

const DEFAULT_WIDTH: usize = 48;
const UNIT_GAP: &str = "   ";

/// Produces the text for one frame of the widget.
pub trait Renderer: fmt::Debug + Send {
    /// Draws the countdown.
    fn render(&self, frame: &DisplayFrame) -> String;

    /// Draws a toast notice.
    fn render_notice(&self, notice: &Notice) -> String;
}

/// Styles used by [`TerminalRenderer`].
#[derive(Debug, Clone)]
pub struct RenderStyles {
    /// The countdown title.
    pub title: Style,
    /// The unit digits.
    pub digits: Style,
    /// The unit labels.
    pub labels: Style,
    /// Remaining and target sentences.
    pub caption: Style,
    /// Title and digits while celebrating.
    pub celebration: Style,
}

impl Default for RenderStyles {
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        Self {
            title: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#1a1a1a",
                Dark: "#ffffff",
            }),
            digits: Style::new().bold(true).foreground(Color::from("#7571F9")),
            labels: Style::new().foreground(AdaptiveColor {
                Light: "#9CA3AF",
                Dark: "#6B7280",
            }),
            caption: Style::new().foreground(AdaptiveColor {
                Light: "#4A4A4A",
                Dark: "#B2B2B2",
            }),
            celebration: Style::new()
                .bold(true)
                .foreground(Color::from(CELEBRATION_COLOR)),
        }
    }
}

/// Renders the widget with lipgloss styles.
#[derive(Debug, Clone)]
pub struct TerminalRenderer {
    /// Maximum width of the title line.
    pub width: usize,
    /// Bar drawn under the units.
    pub progress: progress::Model,
    /// Text styles.
    pub styles: RenderStyles,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl TerminalRenderer {
    /// A renderer whose title and bar fit in `width` cells.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            progress: progress::new(&[
                progress::with_width(width as i32),
                progress::with_default_gradient(),
            ]),
            styles: RenderStyles::default(),
        }
    }

    fn units_view(&self, frame: &DisplayFrame) -> (String, String) {
        let values = [&frame.days, &frame.hours, &frame.minutes, &frame.seconds];
        let digit_style = if frame.celebrating {
            &self.styles.celebration
        } else {
            &self.styles.digits
        };

        let mut digits = Vec::with_capacity(4);
        let mut labels = Vec::with_capacity(4);
        for (value, label) in values.iter().zip(frame.unit_labels.iter()) {
            let cell = value.width().max(label.width());
            digits.push(digit_style.render(&center(value, cell)));
            labels.push(self.styles.labels.render(&center(label, cell)));
        }
        (digits.join(UNIT_GAP), labels.join(UNIT_GAP))
    }
}

impl Renderer for TerminalRenderer {
    fn render(&self, frame: &DisplayFrame) -> String {
        let title = truncate(&frame.title, self.width);
        let title = if frame.celebrating {
            self.styles.celebration.render(&format!("🎉 {title} 🎉"))
        } else {
            self.styles.title.render(&title)
        };
        let (digits, labels) = self.units_view(frame);

        [
            title,
            String::new(),
            digits,
            labels,
            String::new(),
            self.progress.view_as(frame.progress),
            self.styles.caption.render(&frame.remaining_text),
            self.styles.caption.render(&frame.target_text),
        ]
        .join("\n")
    }

    fn render_notice(&self, notice: &Notice) -> String {
        let (icon, color) = match notice.kind {
            NoticeKind::Success => ("✓", SUCCESS_COLOR),
            NoticeKind::Error => ("✗", ERROR_COLOR),
            NoticeKind::Info => ("i", INFO_COLOR),
        };
        Style::new()
            .bold(true)
            .foreground(Color::from(color))
            .render(&format!("{icon} {}", notice.text))
    }
}

/// Shortens `text` to at most `max` cells, ending in `…` when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for g in text.graphemes(true) {
        let w = g.width();
        if used + w + 1 > max {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out.push('…');
    out
}

fn center(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
}
