//! Terminal session for lsnav.
//!
//! Owns raw mode, the alternate screen and the hidden cursor for as long as the navigator
//! runs, and implements [Session] on top of ratatui + crossterm.
//! The editor gets the plain terminal back while it runs.

use crate::app::{Input, Session, View};
use crate::config::Theme;
use crate::core::error::Result;
use crate::core::proc;
use crate::ui;

use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::debug;

use std::io::{self, Stdout};
use std::path::Path;

pub struct TerminalSession<'a> {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    theme: &'a Theme,
    active: bool,
}

impl<'a> TerminalSession<'a> {
    /// Switches the terminal to raw mode and the alternate screen.
    ///
    /// Everything is undone by [Self::restore] or on drop.
    pub fn enter(theme: &'a Theme) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e);
        }

        let mut session = Self {
            terminal: Terminal::new(CrosstermBackend::new(stdout))?,
            theme,
            active: true,
        };
        session.terminal.clear()?;
        Ok(session)
    }

    /// Leaves the alternate screen. Safe to call more than once.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show)
    }

    fn suspend(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show)
    }

    fn resume(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        execute!(self.terminal.backend_mut(), EnterAlternateScreen, Hide)?;
        // full clear/reset, the editor left its own screen behind
        self.terminal.clear()
    }
}

impl Drop for TerminalSession<'_> {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl Session for TerminalSession<'_> {
    fn render(&mut self, view: &View) -> Result<()> {
        let theme = self.theme;
        self.terminal.draw(|f| ui::render(f, view, theme))?;
        Ok(())
    }

    fn read_input(&mut self) -> Result<Input> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(Input::Key(key)),
                Event::Resize(_, _) => return Ok(Input::Resize),
                _ => {}
            }
        }
    }

    fn show_help(&mut self, view: &View, text: &str) -> Result<()> {
        let theme = self.theme;
        loop {
            self.terminal.draw(|f| ui::render_help(f, view, theme, text))?;

            // any key acknowledges, a resize redraws
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(()),
                _ => {}
            }
        }
    }

    fn edit(&mut self, editor: &str, file: &Path) -> Result<()> {
        debug!(file = %file.display(), "suspending terminal for editor");
        self.suspend()?;
        let result = proc::run_editor(editor, file);
        self.resume()?;
        result
    }
}
