//! The main config loading module for lsnav.
//!
//! Handles loading and deserializing settings from `lsnav.toml`, and layering command
//! line flags on top of them.
//!
//! Provides the main [Config] struct, the [RawConfig] used for parsing, and default config
//! generation for `lsn --init`.

use crate::config::{Editor, General, Keys, Shell, Theme};
use crate::utils::cli::Args;
use crate::utils::get_home;

use serde::Deserialize;
use tracing::{debug, warn};

use std::path::{Path, PathBuf};
use std::{fs, io};

/// Raw configuration as read from the toml file
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    theme: Theme,
    editor: Editor,
    shell: Shell,
    keys: Keys,
}

/// Main configuration struct for lsnav
#[derive(Debug, Clone, Default)]
pub struct Config {
    general: General,
    theme: Theme,
    editor: Editor,
    shell: Shell,
    keys: Keys,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: raw.general,
            theme: raw.theme,
            editor: raw.editor,
            shell: raw.shell,
            keys: raw.keys,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// A missing file yields the defaults; an unreadable or invalid file is logged and
    /// also yields the defaults.
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<RawConfig>(&content) {
                Ok(raw) => {
                    debug!(path = %path.display(), "loaded config");
                    raw.into()
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read config, using defaults");
                Self::default()
            }
        }
    }

    /// Applies command line flags. Flags can only switch display modes on.
    pub fn apply_args(&mut self, args: &Args) {
        if args.show_hidden {
            self.general.set_show_hidden(true);
        }
        if args.long_format {
            self.general.set_long_format(true);
        }
        if let Some(editor) = args.editor.as_deref().filter(|e| !e.trim().is_empty()) {
            self.editor.set_cmd(editor.to_string());
        }
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &General {
        &self.general
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    #[inline]
    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Editor command after environment fallback.
    pub fn editor_cmd(&self) -> String {
        self.editor.resolve(std::env::var(super::EDITOR_ENV).ok())
    }

    /// Shell command after environment fallback.
    pub fn shell_cmd(&self) -> String {
        self.shell.resolve(std::env::var(super::SHELL_ENV).ok())
    }

    /// Determine the default configuration file path.
    /// Checks LSNAV_CONFIG first, then XDG_CONFIG_HOME,
    /// then defaults to ~/.config/lsnav/lsnav.toml.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("LSNAV_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("lsnav/lsnav.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/lsnav/lsnav.toml");
        }
        PathBuf::from("lsnav.toml")
    }

    /// Generate a commented default configuration file at the specified path.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        println!("Default config generated at {:?}", path);
        Ok(())
    }
}

const DEFAULT_TOML: &str = r##"# lsnav.toml - default configuration for lsnav
# Commented values are the internal defaults.
# Command line flags (-a, -l, --editor) take precedence over this file.

[general]
# show_hidden = false
# long_format = false
# sort_by_name = true       # false keeps the filesystem's own order

[editor]
# cmd = ""                  # empty uses $EDITOR

[shell]
# cmd = ""                  # empty uses $SHELL

# Colours accept terminal names ("cyan") or hex ("#RRGGBB", "#RGB")
[theme]
# directory.fg = "blue"
# symlink.fg = "cyan"
# setuid.fg = "red"
# path.fg = "#708090"
# entry.fg = "default"
# selection.bg = "default"  # default renders the selection reversed

[keys]
# quit = ["q", "Esc"]
# help = ["?"]
# open = ["Enter", "l", "Right"]
# parent = ["h", "Left"]
# down = ["j", "Down"]
# up = ["k", "Up"]
# toggle_hidden = ["H"]
# toggle_long = ["L"]
"##;
