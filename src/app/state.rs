//! The navigator loop of lsnav.
//!
//! [Navigator] drives one blocking cycle after another:
//! list the current directory, render, wait for a key, apply it to [NavState], and once a
//! pending action is set, dispatch it. Dispatching either starts the next cycle (with or
//! without a fresh listing) or ends the loop.
//!
//! The loop never touches the terminal itself. Everything visible goes through a
//! [Session], which keeps the state machine testable without a tty.
//!
//! Listing, parent resolution and terminal failures end the loop. The path handed back in
//! [LoopExit] is always the last directory that was listed successfully, so the shell
//! handoff still has somewhere sane to start.

use crate::app::keymap::Keymap;
use crate::app::nav::{Effect, Focus, NavState, PendingAction};
use crate::app::session::{Input, Session, View};
use crate::config::Config;
use crate::core::error::{NavError, Result};
use crate::core::fm::list_dir;
use crate::core::formatter::{DisplayLine, display_lines};
use crate::utils::parent_dir;

use chrono::Local;
use tracing::{debug, error, warn};

use std::path::PathBuf;

/// Why the loop stopped.
#[derive(Debug)]
pub enum ExitReason {
    Quit,
    Failed(NavError),
}

/// Final outcome of [Navigator::run].
#[derive(Debug)]
pub struct LoopExit {
    /// Last successfully listed directory.
    pub path: PathBuf,
    pub reason: ExitReason,
}

/// What the loop does after a pending action was resolved.
#[derive(Debug)]
enum Step {
    Relist(Focus),
    Browse,
    Exit,
}

pub struct Navigator<'a, S: Session> {
    config: &'a Config,
    keymap: Keymap,
    nav: NavState,
    session: S,
    editor: String,
    help: String,
    last_good: PathBuf,
}

impl<'a, S: Session> Navigator<'a, S> {
    /// Sets up the navigator at `path`. Nothing is listed until [Self::run].
    pub fn new(config: &'a Config, path: PathBuf, session: S) -> Self {
        let general = config.general();
        Self {
            config,
            keymap: Keymap::from_keys(config.keys()),
            nav: NavState::new(path.clone(), general.show_hidden(), general.long_format()),
            session,
            editor: config.editor_cmd(),
            help: config.keys().help_text(),
            last_good: path,
        }
    }

    pub fn into_session(self) -> S {
        self.session
    }

    /// Runs the loop until the user quits or something fatal happens.
    pub fn run(&mut self) -> LoopExit {
        let mut step = Step::Relist(Focus::Top);
        loop {
            let result = match step {
                Step::Exit => return self.finish(ExitReason::Quit),
                Step::Relist(focus) => self.relist(focus).and_then(|()| self.cycle()),
                Step::Browse => self.cycle(),
            };

            step = match result {
                Ok(next) => next,
                Err(e) => {
                    error!("navigation stopped: {e}");
                    return self.finish(ExitReason::Failed(e));
                }
            };
        }
    }

    fn finish(&self, reason: ExitReason) -> LoopExit {
        debug!(path = %self.last_good.display(), ?reason, "leaving navigator");
        LoopExit {
            path: self.last_good.clone(),
            reason,
        }
    }

    fn relist(&mut self, focus: Focus) -> Result<()> {
        let listing = list_dir(
            self.nav.path(),
            self.nav.show_hidden(),
            self.config.general().sort_by_name(),
        )?;
        self.last_good = self.nav.path().to_path_buf();
        self.nav.set_listing(listing, focus);
        Ok(())
    }

    fn cycle(&mut self) -> Result<Step> {
        self.browse()?;
        self.dispatch()
    }

    /// Renders and reads keys until one of them needs more than a redraw.
    fn browse(&mut self) -> Result<()> {
        loop {
            let lines = self.lines();
            self.session.render(&view(&self.nav, &lines))?;

            let key = match self.session.read_input()? {
                Input::Resize => continue,
                Input::Key(key) => key,
            };
            let Some(action) = self.keymap.lookup(key) else {
                continue;
            };

            match self.nav.apply(action) {
                Effect::Redraw => {}
                Effect::Relist | Effect::Dispatch => return Ok(()),
            }
        }
    }

    fn dispatch(&mut self) -> Result<Step> {
        match self.nav.take_pending() {
            // a toggle that only needs the directory read again
            PendingAction::None => Ok(Step::Relist(Focus::Keep)),
            PendingAction::Exit => Ok(Step::Exit),
            PendingAction::Help => {
                let lines = self.lines();
                self.session.show_help(&view(&self.nav, &lines), &self.help)?;
                Ok(Step::Browse)
            }
            PendingAction::Parent => self.go_parent(),
            PendingAction::Open => self.open_selected(),
        }
    }

    fn go_parent(&mut self) -> Result<Step> {
        let current = self.nav.path().to_path_buf();
        let parent = parent_dir(&current)?;

        let focus = match current.file_name() {
            Some(name) if parent != current => Focus::Name(name.to_os_string()),
            _ => Focus::Keep,
        };
        debug!(from = %current.display(), to = %parent.display(), "going to parent");
        self.nav.set_path(parent);
        Ok(Step::Relist(focus))
    }

    fn open_selected(&mut self) -> Result<Step> {
        let Some(entry) = self.nav.selected_entry() else {
            return self.go_parent();
        };
        let target = self.nav.path().join(entry.name());

        // follows symlinks, unlike the listing
        if target.is_dir() {
            debug!(path = %target.display(), "entering directory");
            self.nav.set_path(target);
            return Ok(Step::Relist(Focus::Top));
        }

        match self.session.edit(&self.editor, &target) {
            Ok(()) => {}
            Err(e) if e.is_external_process() => {
                warn!(file = %target.display(), "editor failed: {e}");
            }
            Err(e) => return Err(e),
        }
        Ok(Step::Relist(Focus::Keep))
    }

    fn lines(&self) -> Vec<DisplayLine> {
        display_lines(self.nav.listing(), self.nav.long_format(), &Local::now())
    }
}

fn view<'v>(nav: &'v NavState, lines: &'v [DisplayLine]) -> View<'v> {
    View {
        path: nav.path(),
        lines,
        selected: nav.selected_idx(),
        skipped: nav.listing().skipped(),
        show_hidden: nav.show_hidden(),
        long_format: nav.long_format(),
    }
}
