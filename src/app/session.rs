//! The seam between the navigator loop and the terminal.
//!
//! The loop only talks to a [Session]: draw this view, give me the next input, show help,
//! run the editor. The real implementation lives in [crate::core::terminal]; tests drive
//! the loop with a scripted one.

use crate::core::error::Result;
use crate::core::formatter::DisplayLine;

use crossterm::event::KeyEvent;
use std::path::Path;

/// Input that matters to the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key(KeyEvent),
    Resize,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub path: &'a Path,
    pub lines: &'a [DisplayLine],
    pub selected: usize,
    pub skipped: usize,
    pub show_hidden: bool,
    pub long_format: bool,
}

pub trait Session {
    /// Draws the listing.
    fn render(&mut self, view: &View) -> Result<()>;

    /// Blocks until the next key press or resize.
    fn read_input(&mut self) -> Result<Input>;

    /// Shows the key help over the listing and returns after any key.
    fn show_help(&mut self, view: &View, text: &str) -> Result<()>;

    /// Hands the terminal to `editor` for `file` and takes it back afterwards.
    ///
    /// Terminal errors while suspending or resuming are returned as
    /// [crate::core::error::NavError::Terminal]; editor failures as the process variants.
    fn edit(&mut self, editor: &str, file: &Path) -> Result<()>;
}
