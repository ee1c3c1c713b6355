//! Input configuration options for lsnav
//!
//! Key bindings for every navigator action plus the editor and shell commands, read from
//! the `[keys]`, `[editor]` and `[shell]` tables of lsnav.toml.

use serde::Deserialize;

/// Environment variable consulted when no editor is configured.
pub const EDITOR_ENV: &str = "EDITOR";
/// Environment variable consulted when no shell is configured.
pub const SHELL_ENV: &str = "SHELL";

/// Input configuration options of all actions
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Keys {
    quit: Vec<String>,
    help: Vec<String>,
    open: Vec<String>,
    parent: Vec<String>,
    down: Vec<String>,
    up: Vec<String>,
    toggle_hidden: Vec<String>,
    toggle_long: Vec<String>,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    quit,
    help,
    open,
    parent,
    down,
    up,
    toggle_hidden,
    toggle_long,
);

impl Default for Keys {
    fn default() -> Self {
        Keys {
            quit: vec!["q".into(), "Esc".into()],
            help: vec!["?".into()],
            open: vec!["Enter".into(), "l".into(), "Right".into()],
            parent: vec!["h".into(), "Left".into()],
            down: vec!["j".into(), "Down".into()],
            up: vec!["k".into(), "Up".into()],
            toggle_hidden: vec!["H".into()],
            toggle_long: vec!["L".into()],
        }
    }
}

impl Keys {
    /// Text of the help overlay, built from the bindings actually in use.
    pub fn help_text(&self) -> String {
        let rows: [(&[String], &str); 8] = [
            (self.down(), "down"),
            (self.up(), "up"),
            (self.parent(), "go to parent directory"),
            (self.open(), "open file/directory"),
            (self.toggle_hidden(), "toggle hidden files"),
            (self.toggle_long(), "toggle long format"),
            (self.help(), "show this help"),
            (self.quit(), "exit"),
        ];

        rows.iter()
            .filter(|(keys, _)| !keys.is_empty())
            .map(|(keys, what)| format!("{:<16} {}", keys.join(", "), what))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Editor configuration options
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Editor {
    cmd: String,
}

impl Editor {
    /// The configured command, or `env_value` (normally `$EDITOR`) when none is set.
    /// Empty when neither is available.
    pub fn resolve(&self, env_value: Option<String>) -> String {
        resolve_command(&self.cmd, env_value)
    }

    pub(crate) fn set_cmd(&mut self, cmd: String) {
        self.cmd = cmd;
    }
}

/// Shell configuration options
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Shell {
    cmd: String,
}

impl Shell {
    /// The configured shell, or `env_value` (normally `$SHELL`).
    pub fn resolve(&self, env_value: Option<String>) -> String {
        resolve_command(&self.cmd, env_value)
    }
}

fn resolve_command(explicit: &str, env_value: Option<String>) -> String {
    let trimmed = explicit.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    env_value
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_command_beats_environment() {
        let mut editor = Editor::default();
        assert_eq!(editor.resolve(Some("nano".into())), "nano");
        assert_eq!(editor.resolve(None), "");

        editor.set_cmd("  hx ".into());
        assert_eq!(editor.resolve(Some("nano".into())), "hx");
    }

    #[test]
    fn shell_falls_back_to_environment() {
        let shell = Shell::default();
        assert_eq!(shell.resolve(Some("/bin/zsh".into())), "/bin/zsh");
        assert_eq!(shell.resolve(None), "");
    }

    #[test]
    fn help_lists_every_default_binding() {
        let help = Keys::default().help_text();
        let needles = [
            "j, Down",
            "k, Up",
            "h, Left",
            "Enter, l, Right",
            "H ",
            "L ",
            "?",
            "q, Esc",
        ];
        for needle in needles {
            assert!(help.contains(needle), "missing {needle:?} in:\n{help}");
        }
        assert_eq!(help.lines().count(), 8);
    }
}
