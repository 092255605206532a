//! Colors and styles for the desktop window.

use ratatui::style::{Color, Modifier, Style};

/// Dark color scheme for the analyzer window.
pub struct Theme {
    /// Window background.
    pub background: Color,
    /// Heading text.
    pub heading: Color,
    /// Input box background.
    pub input_background: Color,
    /// Typed text and cursor.
    pub text: Color,
    /// Footer text.
    pub footer: Color,
}

impl Theme {
    /// The analyzer's only theme.
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(0x12, 0x12, 0x12),
            heading: Color::Rgb(0x00, 0xBF, 0xFF),
            input_background: Color::Rgb(0x1E, 0x1E, 0x1E),
            text: Color::White,
            footer: Color::Rgb(0x55, 0x55, 0x55),
        }
    }

    /// Base style applied to the whole window.
    pub fn window_style(&self) -> Style {
        Style::default().bg(self.background).fg(self.text)
    }

    /// Style for the heading line.
    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.heading)
            .bg(self.background)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the input box.
    pub fn input_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.input_background)
    }

    /// Style for the result area, given a presentation color.
    pub fn result_style(&self, color: &str) -> Style {
        Style::default()
            .fg(parse_color(color))
            .bg(self.background)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the footer line.
    pub fn footer_style(&self) -> Style {
        Style::default().fg(self.footer).bg(self.background)
    }
}

/// Parses `#RRGGBB` or a named color; unknown names fall back to the terminal default.
pub fn parse_color(color: &str) -> Color {
    color.parse().unwrap_or(Color::Reset)
}
