//! UI-related tests for lsnav
//!
//! These tests drive the navigator through a session that draws into ratatui's in-memory
//! backend, so they cover the path from key presses to what ends up on screen.
//!
//! These tests create temporary directories and files, which are cleaned up afterwards.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use lsnav::app::{ExitReason, Input, Navigator, Session, View};
use lsnav::config::{Config, RawConfig, Theme};
use lsnav::core::{NavError, Result};
use lsnav::ui;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::collections::VecDeque;
use std::error;
use std::fs;
use std::io;
use std::path::Path;
use tempfile::tempdir;

struct BufferSession {
    terminal: Terminal<TestBackend>,
    theme: Theme,
    keys: VecDeque<KeyCode>,
    screens: Vec<Vec<String>>,
    helps: usize,
}

impl BufferSession {
    fn new(keys: &[KeyCode]) -> std::result::Result<Self, Box<dyn error::Error>> {
        Ok(Self {
            terminal: Terminal::new(TestBackend::new(60, 20))?,
            theme: Theme::default(),
            keys: keys.iter().copied().collect(),
            screens: Vec::new(),
            helps: 0,
        })
    }

    fn snapshot(&mut self) {
        let buffer = self.terminal.backend().buffer();
        let rows = (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect();
        self.screens.push(rows);
    }

    fn last_screen(&self) -> &[String] {
        self.screens.last().map(Vec::as_slice).unwrap_or_default()
    }
}

fn draw_err<E: std::fmt::Display>(e: E) -> NavError {
    NavError::Terminal(io::Error::other(e.to_string()))
}

impl Session for BufferSession {
    fn render(&mut self, view: &View) -> Result<()> {
        let theme = &self.theme;
        self.terminal
            .draw(|f| ui::render(f, view, theme))
            .map_err(draw_err)?;
        self.snapshot();
        Ok(())
    }

    fn read_input(&mut self) -> Result<Input> {
        self.keys
            .pop_front()
            .map(|code| Input::Key(KeyEvent::new(code, KeyModifiers::NONE)))
            .ok_or_else(|| NavError::Terminal(io::Error::other("out of keys")))
    }

    fn show_help(&mut self, view: &View, text: &str) -> Result<()> {
        let theme = &self.theme;
        self.terminal
            .draw(|f| ui::render_help(f, view, theme, text))
            .map_err(draw_err)?;
        self.snapshot();
        self.helps += 1;
        Ok(())
    }

    fn edit(&mut self, _editor: &str, _file: &Path) -> Result<()> {
        Ok(())
    }
}

#[test]
fn browsing_updates_the_screen() -> std::result::Result<(), Box<dyn error::Error>> {
    let tmp = tempdir()?;
    fs::create_dir(tmp.path().join("docs"))?;
    fs::write(tmp.path().join("docs").join("guide.md"), "# guide")?;
    fs::write(tmp.path().join("readme"), "")?;

    let config = Config::default();
    let session = BufferSession::new(&[KeyCode::Char('j'), KeyCode::Enter, KeyCode::Char('q')])?;
    let mut navigator = Navigator::new(&config, tmp.path().to_path_buf(), session);
    let exit = navigator.run();
    let session = navigator.into_session();

    assert!(matches!(exit.reason, ExitReason::Quit));
    assert_eq!(exit.path, tmp.path().join("docs"));

    let first = &session.screens[0];
    assert!(first[0].ends_with(&tmp.path().display().to_string()) || first[0].starts_with('~'));
    assert_eq!(&first[1..4], &["..", "docs", "readme"]);

    let last = session.last_screen();
    assert!(last[0].contains("docs"), "{last:?}");
    assert_eq!(&last[1..3], &["..", "guide.md"]);
    Ok(())
}

#[test]
fn help_overlay_is_shown_from_config_bindings() -> std::result::Result<(), Box<dyn error::Error>> {
    let tmp = tempdir()?;
    let raw: RawConfig = toml::from_str(
        r#"
        [keys]
        help = ["i"]
        quit = ["x"]
        "#,
    )?;
    let config = Config::from(raw);

    let keys = [KeyCode::Char('?'), KeyCode::Char('i'), KeyCode::Char('x')];
    let session = BufferSession::new(&keys)?;
    let mut navigator = Navigator::new(&config, tmp.path().to_path_buf(), session);
    let exit = navigator.run();
    let session = navigator.into_session();

    assert!(matches!(exit.reason, ExitReason::Quit));
    assert_eq!(session.helps, 1);

    let help_screen = session
        .screens
        .iter()
        .find(|s| s.iter().any(|r| r.contains("Help")))
        .ok_or("help never drawn")?;
    assert!(help_screen.iter().any(|r| r.contains("i ") && r.contains("show this help")));
    Ok(())
}

#[test]
fn hidden_toggle_and_cli_flags() -> std::result::Result<(), Box<dyn error::Error>> {
    use clap::Parser;
    use lsnav::utils::cli::Args;

    let tmp = tempdir()?;
    fs::write(tmp.path().join(".env"), "")?;
    fs::write(tmp.path().join("main.rs"), "")?;

    let mut config = Config::default();
    config.apply_args(&Args::try_parse_from(["lsn", "-a"])?);

    let session = BufferSession::new(&[KeyCode::Char('H'), KeyCode::Char('q')])?;
    let mut navigator = Navigator::new(&config, tmp.path().to_path_buf(), session);
    navigator.run();
    let session = navigator.into_session();

    assert!(session.screens[0][0].contains("[all]"));
    assert_eq!(&session.screens[0][1..4], &["..", ".env", "main.rs"]);
    assert!(!session.screens[1][0].contains("[all]"));
    assert_eq!(&session.screens[1][1..3], &["..", "main.rs"]);
    Ok(())
}
