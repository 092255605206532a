//! Desktop front-end: a full-screen terminal window with one input line.
//!
//! Type a sentence and press Enter to classify it. Esc or Ctrl+C closes the
//! window. Classification runs on the event-loop thread, so the window is
//! unresponsive while the model works.

pub mod app;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use crate::classifier::Classifier;
pub use app::DesktopApp;

const WINDOW_TITLE: &str = "🤖 Instant AI Sentiment Analyzer";

/// Owns the terminal while the window is open and restores it on drop.
pub struct DesktopShell<C: Classifier> {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: DesktopApp<C>,
}

impl<C: Classifier> DesktopShell<C> {
    /// Switch the terminal into the analyzer window.
    pub fn new(classifier: C) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        // Drop never runs for a shell that failed to build.
        let terminal = undo_on_err(open_terminal(), restore_terminal)?;

        Ok(Self {
            terminal,
            app: DesktopApp::new(classifier),
        })
    }

    /// Run the event loop until the user closes the window.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.terminal.draw(|f| self.app.render(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        break;
                    }

                    if self.app.handle_key(key) {
                        break;
                    }
                }
            }
        }

        self.cleanup()?;
        Ok(())
    }

    /// Restore the terminal.
    fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl<C: Classifier> Drop for DesktopShell<C> {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn open_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle(WINDOW_TITLE))
        .context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Failed to create terminal")
}

fn restore_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Runs `undo` when `result` is an error, then hands `result` back.
fn undo_on_err<T>(result: Result<T>, undo: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

/// Open the window, run it to completion, and restore the terminal.
pub fn run<C: Classifier>(classifier: C) -> Result<()> {
    tracing::info!("opening desktop window");
    DesktopShell::new(classifier)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn failed_setup_restores_terminal() {
        let restored = Cell::new(false);
        let result: Result<()> =
            undo_on_err(Err(anyhow::anyhow!("no tty")), || restored.set(true));
        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn successful_setup_keeps_terminal() {
        let restored = Cell::new(false);
        let result = undo_on_err(Ok(7), || restored.set(true));
        assert_eq!(result.unwrap(), 7);
        assert!(!restored.get());
    }
}
