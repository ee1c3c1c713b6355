//! Theme configuration options for lsnav
//!
//! Colours of the list categories, the path header and the selection bar, read from the
//! `[theme]` table of lsnav.toml.
//! # Examples
//! ```toml
//! [theme.directory]
//! fg = "blue"
//! [theme.selection]
//! bg = "#3a3a3a"
//! ```

use crate::core::formatter::EntryStyle;
use crate::utils::parse_color;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Theme {
    entry: ColorPair,
    directory: ColorPair,
    symlink: ColorPair,
    setuid: ColorPair,
    path: ColorPair,
    selection: ColorPair,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            entry: ColorPair::default(),
            directory: ColorPair::fg(Color::Blue),
            symlink: ColorPair::fg(Color::Cyan),
            setuid: ColorPair::fg(Color::Red),
            // slate gray
            path: ColorPair::fg(Color::Rgb(0x70, 0x80, 0x90)),
            selection: ColorPair::default(),
        }
    }
}

impl Theme {
    /// Style for one list line.
    pub fn style_for(&self, style: EntryStyle) -> Style {
        match style {
            EntryStyle::Parent | EntryStyle::Plain => self.entry.as_style(),
            EntryStyle::Directory => self.directory.as_style(),
            EntryStyle::Symlink => self.symlink.as_style(),
            EntryStyle::Setuid => self.setuid.as_style(),
        }
    }

    pub fn path_style(&self) -> Style {
        self.path.as_style()
    }

    /// Selection bar style. Reverse video when no colour is configured.
    pub fn selection_style(&self) -> Style {
        if self.selection.is_reset() {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            self.selection.as_style()
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    #[serde(default = "reset", deserialize_with = "deserialize_color_field")]
    fg: Color,
    #[serde(default = "reset", deserialize_with = "deserialize_color_field")]
    bg: Color,
}

impl Default for ColorPair {
    fn default() -> Self {
        ColorPair {
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

impl ColorPair {
    fn fg(fg: Color) -> Self {
        ColorPair {
            fg,
            ..ColorPair::default()
        }
    }

    fn is_reset(&self) -> bool {
        self.fg == Color::Reset && self.bg == Color::Reset
    }

    pub fn as_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

fn reset() -> Color {
    Color::Reset
}

fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}
