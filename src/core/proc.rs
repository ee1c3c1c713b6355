//! External process handling for lsnav.
//!
//! Two programs are ever started: the editor, run synchronously for a file while the
//! navigator waits, and the shell, which replaces the navigator once the loop is over.
//! Both are given as a command string from config or environment, which may carry
//! arguments (`"code --wait"`). The program is looked up on `PATH` with `which`. A command
//! that is the path of an existing file is run as is, so paths with spaces still work.

use crate::core::error::{NavError, Result};

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

/// A resolved command line: program path plus leading arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandLine {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandLine {
    /// Locates the program of `cmd`.
    ///
    /// A `cmd` naming an existing file is taken whole, with no arguments. Anything else is
    /// split on whitespace, the first word being the program. `what` names the role
    /// ("editor", "shell") for the error message when `cmd` is empty.
    pub fn resolve(what: &'static str, cmd: &str) -> Result<Self> {
        let whole = Path::new(cmd.trim());
        if whole.is_absolute() && whole.is_file() {
            return Ok(CommandLine {
                program: whole.to_path_buf(),
                args: Vec::new(),
            });
        }

        let mut parts = cmd.split_whitespace();
        let name = parts.next().ok_or(NavError::NotConfigured(what))?;
        let program = which::which(name).map_err(|source| NavError::NotFound {
            program: name.to_string(),
            source,
        })?;
        Ok(CommandLine {
            program,
            args: parts.map(str::to_string).collect(),
        })
    }

    #[inline]
    pub fn program(&self) -> &Path {
        &self.program
    }

    #[inline]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn display_name(&self) -> String {
        self.program.display().to_string()
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

/// Runs the editor on `file` and waits for it to exit.
///
/// Stdio is inherited so the editor owns the terminal until it quits. Nothing is captured.
pub fn run_editor(editor: &str, file: &Path) -> Result<()> {
    let cmdline = CommandLine::resolve("editor", editor)?;
    debug!(editor = %cmdline.display_name(), file = %file.display(), "launching editor");

    let status = cmdline
        .command()
        .arg(file)
        .status()
        .map_err(|source| NavError::Spawn {
            program: cmdline.display_name(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(NavError::ExitStatus {
            program: cmdline.display_name(),
            status,
        })
    }
}

/// Result of a handoff that returned control to lsnav.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handoff {
    /// The final path is no longer a directory, so no shell was started.
    Skipped,
    /// The shell ran as a child (platforms without exec) and exited with this code.
    Exited(i32),
}

/// Replaces the current process with an interactive shell rooted at `dir`.
///
/// On unix this only returns on failure. Elsewhere the shell runs as a child and its exit
/// code is handed back for the caller to exit with.
pub fn handoff(dir: &Path, shell: &str) -> Result<Handoff> {
    if !dir.is_dir() {
        debug!(path = %dir.display(), "final path is not a directory, skipping shell");
        return Ok(Handoff::Skipped);
    }

    let cmdline = CommandLine::resolve("shell", shell)?;
    info!(shell = %cmdline.display_name(), dir = %dir.display(), "handing off to shell");

    let mut cmd = cmdline.command();
    cmd.current_dir(dir);

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        let source = cmd.exec();
        Err(NavError::Spawn {
            program: cmdline.display_name(),
            source,
        })
    }
    #[cfg(not(unix))]
    {
        let status = cmd.status().map_err(|source| NavError::Spawn {
            program: cmdline.display_name(),
            source,
        })?;
        Ok(Handoff::Exited(status.code().unwrap_or(1)))
    }
}
