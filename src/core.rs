//! Core runtime pieces of lsnav.
//!
//! - [error]: [NavError] and the crate [Result] alias.
//! - [fm]: directory listing, see [list_dir], [Entry] and [Listing].
//! - [formatter]: display lines, sizes, dates and mode strings.
//! - [proc]: editor invocation and the shell handoff.
//! - [terminal]: the ratatui/crossterm [TerminalSession].

pub mod error;
pub mod fm;
pub mod formatter;
pub mod proc;
pub mod terminal;

pub use error::{NavError, Result};
pub use fm::{Entry, Listing, list_dir};
pub use formatter::{DisplayLine, EntryStyle, display_lines, sanitize_to_width};
pub use proc::{Handoff, handoff, run_editor};
pub use terminal::TerminalSession;
