//! TUI rendering traits for monthcal types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to monthcal-core types using owo_colors.

use monthcal_core::{Event, EventColor};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Colorize text with the event's palette color
pub fn paint(color: EventColor, text: &str) -> String {
    match color {
        EventColor::Red => text.red().to_string(),
        EventColor::Blue => text.blue().to_string(),
        EventColor::Green => text.green().to_string(),
        EventColor::Yellow => text.yellow().to_string(),
        EventColor::Purple => text.magenta().to_string(),
    }
}

impl Render for EventColor {
    fn render(&self) -> String {
        paint(*self, &format!("● {}", self.label()))
    }
}

impl Render for Event {
    fn render(&self) -> String {
        format!(
            "{} {} {}",
            self.time_range().dimmed(),
            paint(self.color, &self.name).bold(),
            format!("[{}]", self.color.label()).dimmed()
        )
    }
}

/// Cut `text` to at most `width` characters, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}
