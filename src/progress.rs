//! Progress bar for the countdown.
//!
//! Renders the elapsed fraction of a countdown as a horizontal bar, optionally
//! followed by a percentage. The bar is a pure function of the fraction it is
//! given: the countdown already recomputes progress every second, so there is
//! nothing to animate between frames.
//!
//! # Basic Usage
//!
//! ```rust
//! use countdown_widget::progress::{new, with_width, with_solid_fill};
//!
//! // Default settings
//! let bar = new(&[]);
//!
//! // Customized with the option pattern
//! let bar = new(&[
//!     with_width(30),
//!     with_solid_fill("#10b981".to_string()),
//! ]);
//! let line = bar.view_as(0.25);
//! assert!(line.contains("25%"));
//! ```

use lipgloss_extras::lipgloss;
use lipgloss_extras::lipgloss::blending::blend_1d;
use lipgloss_extras::prelude::*;

const DEFAULT_WIDTH: i32 = 40;

/// Configuration options for a progress bar.
///
/// Options are applied in order, so a later option overrides an earlier one
/// touching the same setting.
#[derive(Debug, Clone)]
pub enum ProgressOption {
    /// Blend between two colours across the bar.
    WithGradient(String, String),
    /// Blend between two colours across the filled part only.
    WithScaledGradient(String, String),
    /// Fill with one colour.
    WithSolidFill(String),
    /// Characters for the filled and empty parts.
    WithFillCharacters(char, char),
    /// Hide the numeric percentage.
    WithoutPercentage,
    /// Total width including the percentage.
    WithWidth(i32),
}

impl ProgressOption {
    fn apply(&self, m: &mut Model) {
        match self {
            ProgressOption::WithGradient(a, b) => m.set_ramp(a.clone(), b.clone(), false),
            ProgressOption::WithScaledGradient(a, b) => m.set_ramp(a.clone(), b.clone(), true),
            ProgressOption::WithSolidFill(color) => {
                m.full_color = color.clone();
                m.ramp = None;
            }
            ProgressOption::WithFillCharacters(full, empty) => {
                m.full = *full;
                m.empty = *empty;
            }
            ProgressOption::WithoutPercentage => m.show_percentage = false,
            ProgressOption::WithWidth(w) => m.width = *w,
        }
    }
}

/// Gradient from `color_a` to `color_b` across the whole bar.
pub fn with_gradient(color_a: String, color_b: String) -> ProgressOption {
    ProgressOption::WithGradient(color_a, color_b)
}

/// Gradient from `color_a` to `color_b` across the filled part.
pub fn with_scaled_gradient(color_a: String, color_b: String) -> ProgressOption {
    ProgressOption::WithScaledGradient(color_a, color_b)
}

/// The default purple-to-pink gradient.
pub fn with_default_gradient() -> ProgressOption {
    with_gradient("#5A56E0".to_string(), "#EE6FF8".to_string())
}

/// Solid fill colour.
pub fn with_solid_fill(color: String) -> ProgressOption {
    ProgressOption::WithSolidFill(color)
}

/// Custom filled and empty characters.
pub fn with_fill_characters(full: char, empty: char) -> ProgressOption {
    ProgressOption::WithFillCharacters(full, empty)
}

/// Hide the percentage text.
pub fn without_percentage() -> ProgressOption {
    ProgressOption::WithoutPercentage
}

/// Total width in cells, percentage included.
pub fn with_width(w: i32) -> ProgressOption {
    ProgressOption::WithWidth(w)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Ramp {
    color_a: String,
    color_b: String,
    scaled: bool,
}

/// A progress bar.
#[derive(Debug, Clone)]
pub struct Model {
    /// Total width of the bar, including the percentage if shown.
    pub width: i32,
    /// Character for filled cells.
    pub full: char,
    /// Colour of filled cells when no gradient is set.
    pub full_color: String,
    /// Character for empty cells.
    pub empty: char,
    /// Colour of empty cells.
    pub empty_color: String,
    /// Whether to print the percentage after the bar.
    pub show_percentage: bool,
    /// Style applied to the percentage text.
    pub percentage_style: Style,
    ramp: Option<Ramp>,
}

/// Creates a progress bar with the given options.
///
/// Defaults: 40 cells wide, `█` on `░`, fill `#7571F9`, empty `#606060`,
/// percentage shown.
pub fn new(opts: &[ProgressOption]) -> Model {
    let mut m = Model {
        width: DEFAULT_WIDTH,
        full: '█',
        full_color: "#7571F9".to_string(),
        empty: '░',
        empty_color: "#606060".to_string(),
        show_percentage: true,
        percentage_style: Style::new(),
        ramp: None,
    };
    for opt in opts {
        opt.apply(&mut m);
    }
    m
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}

impl Model {
    /// Renders the bar at `percent` (a fraction, clamped to `[0, 1]`).
    pub fn view_as(&self, percent: f64) -> String {
        let percent = if percent.is_finite() {
            percent.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let percent_view = self.percentage_view(percent);
        let percent_width = lipgloss::width_visible(&percent_view) as i32;
        format!("{}{}", self.bar_view(percent, percent_width), percent_view)
    }

    /// Number of filled cells at `percent`, given the percentage text width.
    pub fn filled_cells(&self, percent: f64, text_width: i32) -> i32 {
        let total = (self.width - text_width).max(0);
        (((total as f64) * percent).round() as i32).clamp(0, total)
    }

    fn bar_view(&self, percent: f64, text_width: i32) -> String {
        let total = (self.width - text_width).max(0);
        let filled = self.filled_cells(percent, text_width);
        let full = self.full.to_string();
        let mut out = String::new();

        match &self.ramp {
            Some(ramp) => {
                let span = if ramp.scaled { filled } else { total };
                let steps = span.max(2) as usize;
                let colors = blend_1d(
                    steps,
                    vec![
                        Color::from(ramp.color_a.as_str()),
                        Color::from(ramp.color_b.as_str()),
                    ],
                );
                for i in 0..filled as usize {
                    let color = colors[i.min(steps - 1)].clone();
                    out.push_str(&Style::new().foreground(color).render(&full));
                }
            }
            None => {
                let cell = Style::new()
                    .foreground(Color::from(self.full_color.as_str()))
                    .render(&full);
                out.push_str(&cell.repeat(filled as usize));
            }
        }

        let empty = Style::new()
            .foreground(Color::from(self.empty_color.as_str()))
            .render(&self.empty.to_string());
        out.push_str(&empty.repeat((total - filled) as usize));
        out
    }

    fn percentage_view(&self, percent: f64) -> String {
        if !self.show_percentage {
            return String::new();
        }
        let text = format!(" {:3.0}%", percent * 100.0);
        self.percentage_style.render(&text)
    }

    fn set_ramp(&mut self, color_a: String, color_b: String, scaled: bool) {
        self.ramp = Some(Ramp {
            color_a,
            color_b,
            scaled,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> String {
        String::from_utf8(strip_ansi_escapes::strip(s)).unwrap()
    }

    #[test]
    fn test_defaults() {
        let bar = new(&[]);
        assert_eq!(bar.width, DEFAULT_WIDTH);
        assert_eq!(bar.full, '█');
        assert_eq!(bar.empty, '░');
        assert!(bar.show_percentage);
    }

    #[test]
    fn test_options_apply_in_order() {
        let bar = new(&[
            with_default_gradient(),
            with_solid_fill("#ff0000".to_string()),
            with_width(20),
            with_fill_characters('#', '-'),
            without_percentage(),
        ]);
        assert_eq!(bar.full_color, "#ff0000");
        assert!(bar.ramp.is_none());
        assert_eq!(bar.width, 20);
        assert_eq!((bar.full, bar.empty), ('#', '-'));
        assert!(!bar.show_percentage);
    }

    #[test]
    fn test_view_without_percentage() {
        let bar = new(&[with_width(10), with_fill_characters('#', '-'), without_percentage()]);
        assert_eq!(plain(&bar.view_as(0.0)), "----------");
        assert_eq!(plain(&bar.view_as(0.5)), "#####-----");
        assert_eq!(plain(&bar.view_as(1.0)), "##########");
    }

    #[test]
    fn test_view_clamps_out_of_range() {
        let bar = new(&[with_width(10), with_fill_characters('#', '-'), without_percentage()]);
        assert_eq!(plain(&bar.view_as(1.7)), "##########");
        assert_eq!(plain(&bar.view_as(-0.3)), "----------");
        assert_eq!(plain(&bar.view_as(f64::NAN)), "----------");
    }

    #[test]
    fn test_view_with_percentage_keeps_width() {
        let bar = new(&[with_width(20), with_fill_characters('#', '-')]);
        let line = plain(&bar.view_as(0.5));
        assert!(line.ends_with("  50%"));
        assert_eq!(line.chars().count(), 20);
    }

    #[test]
    fn test_gradient_fill_count() {
        let bar = new(&[
            with_width(12),
            with_scaled_gradient("#000000".to_string(), "#ffffff".to_string()),
            without_percentage(),
        ]);
        let line = plain(&bar.view_as(0.25));
        assert_eq!(line.chars().filter(|c| *c == '█').count(), 3);
        assert_eq!(line.chars().filter(|c| *c == '░').count(), 9);
    }
}
