//! State and rendering for the desktop window.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::Theme;
use crate::classifier::{AnalysisInput, Classifier};
use crate::presentation::{present, Presentation, Surface};

const TITLE: &str = "AI Sentiment Analyzer";
const FOOTER: &str = "Built with ❤️ using Candle";

/// What the window holds between key presses: the line being typed and the
/// result area. Owns its classifier handle.
pub struct DesktopApp<C: Classifier> {
    classifier: C,
    input: String,
    status: Presentation,
    theme: Theme,
}

impl<C: Classifier> DesktopApp<C> {
    /// A fresh window with an empty input and the idle prompt.
    pub fn new(classifier: C) -> Self {
        Self {
            classifier,
            input: String::new(),
            status: Presentation::idle(Surface::Desktop),
            theme: Theme::dark(),
        }
    }

    /// Current contents of the input line.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Current contents of the result area.
    pub fn status(&self) -> &Presentation {
        &self.status
    }

    /// Handle one key press. Returns `true` when the window should close.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.clear();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
            }
            _ => {}
        }
        false
    }

    /// Classify the current input and update the result area.
    ///
    /// Blank input shows the prompt without calling the classifier. A
    /// successful analysis clears the input; a failed one keeps it so the
    /// user can retry.
    pub fn submit(&mut self) {
        let Some(input) = AnalysisInput::parse(&self.input) else {
            self.status = present(None, Surface::Desktop);
            return;
        };

        match self.classifier.classify(&input) {
            Ok(result) => {
                self.status = present(Some(&result), Surface::Desktop);
                self.input.clear();
            }
            Err(err) => {
                tracing::warn!(error = %err, "classification failed");
                self.status = Presentation::failure(Surface::Desktop, &err);
            }
        }
    }

    /// Draw the whole window.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(self.theme.window_style()), area);

        let [_, heading, _, input, _, result, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(2),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(TITLE)
                .style(self.theme.heading_style())
                .alignment(Alignment::Center),
            heading,
        );

        let input_area = centered(input, 60);
        // One column stays free for the cursor after the last character.
        let inner = usize::from(input_area.width.saturating_sub(2));
        let shown = visible_tail(&self.input, inner.saturating_sub(1));
        frame.render_widget(
            Paragraph::new(shown)
                .style(self.theme.input_style())
                .alignment(Alignment::Left)
                .block(Block::bordered().style(self.theme.input_style())),
            input_area,
        );
        let typed = u16::try_from(shown.width()).unwrap_or(u16::MAX);
        let max_x = input_area
            .x
            .saturating_add(input_area.width.saturating_sub(2));
        frame.set_cursor_position((
            input_area.x.saturating_add(1).saturating_add(typed).min(max_x),
            input_area.y.saturating_add(1),
        ));

        frame.render_widget(
            Paragraph::new(self.status.text())
                .style(self.theme.result_style(self.status.color))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            result,
        );

        frame.render_widget(
            Paragraph::new(FOOTER)
                .style(self.theme.footer_style())
                .alignment(Alignment::Center),
            footer,
        );
    }
}

/// The longest suffix of `text` that fits in `width` terminal columns, so the
/// input line scrolls to keep the end of what is being typed in view.
fn visible_tail(text: &str, width: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (idx, c) in text.char_indices().rev() {
        used += c.width().unwrap_or(0);
        if used > width {
            break;
        }
        start = idx;
    }
    &text[start..]
}

/// A horizontally centered slice of `area`, at most `width` columns wide.
fn centered(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
