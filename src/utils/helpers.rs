//! Helpers for lsnav.
//!
//! - Color parsing from strings or hex codes
//! - Lexical absolute paths and parent resolution
//! - Displaying home directories as "~" in file paths
//! - Log file setup

use crate::core::error::{NavError, Result};

use ratatui::style::Color;
use tracing::Level;

use std::fs::{self, OpenOptions};
use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};
use std::sync::Mutex;

/// Parses a string (color name or hex) into a ratatui::style::color
///
/// Supports standard names (red, green, etc.) as well as hex values (#RRGGBB or #RGB)
pub fn parse_color(s: &str) -> Color {
    match s.to_lowercase().as_str() {
        "default" | "reset" => Color::Reset,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "black" => Color::Black,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        _ => {
            if let Some(hex) = s.strip_prefix('#') {
                let expanded = match hex.len() {
                    6 => Some(hex.to_string()),
                    3 => Some(hex.chars().flat_map(|c| [c, c]).collect()),
                    _ => None,
                };
                if let Some(rgb) = expanded.and_then(|h| u32::from_str_radix(&h, 16).ok()) {
                    return Color::Rgb(
                        ((rgb >> 16) & 0xFF) as u8,
                        ((rgb >> 8) & 0xFF) as u8,
                        (rgb & 0xFF) as u8,
                    );
                }
            }
            // fallback
            Color::Reset
        }
    }
}

pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Makes `path` absolute against the working directory and collapses `.` and `..`
/// lexically. Symlinks are not resolved.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let abs = std::path::absolute(path).map_err(|e| NavError::resolution(path, e))?;

    let mut out = PathBuf::new();
    for comp in abs.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                // popping the root is a no-op
                out.pop();
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

/// Absolute parent of `path`. The parent of the root is the root.
pub fn parent_dir(path: &Path) -> Result<PathBuf> {
    let abs = absolutize(path)?;
    Ok(abs.parent().map(Path::to_path_buf).unwrap_or(abs))
}

/// Util function to shorten home directory to ~.
/// Is used by the header line in the ui render function.
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if let Some(home_dir) = get_home()
        && let Ok(stripped) = path.strip_prefix(&home_dir)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        } else {
            let mut short = stripped.display().to_string();
            if short.starts_with(MAIN_SEPARATOR) {
                short.remove(0);
            }
            return format!("~{}{}", MAIN_SEPARATOR, short);
        }
    }
    path.display().to_string()
}

/// Where the log file lives: `<cache dir>/lsnav/lsnav.log`.
pub fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("lsnav").join("lsnav.log"))
}

/// Installs the global tracing subscriber.
///
/// Events go to the log file so they never interleave with the TUI. If the file cannot
/// be opened no subscriber is installed and events are dropped.
/// Returns the log file in use.
pub fn init_logging(debug: bool) -> Option<PathBuf> {
    let path = log_file_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    let level = if debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level)
        .try_init()
        .ok()?;

    if debug {
        tracing::info!("debug mode enabled");
    }
    Some(path)
}
