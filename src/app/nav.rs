//! Navigation state for lsnav.
//!
//! [NavState] owns the current path, its listing, the selection and the display flags,
//! and applies single [Action]s to them. Actions that need the outside world (open,
//! parent, help, exit) are only recorded as a [PendingAction]; the navigator loop
//! resolves them between render cycles.

use crate::app::keymap::Action;
use crate::core::{Entry, Listing};

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// The single queued effect of the most recent key press.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PendingAction {
    #[default]
    None,
    Exit,
    Open,
    Parent,
    Help,
}

/// What the loop must do after an action was applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// State changed in place, draw again and keep waiting.
    Redraw,
    /// The listing must be rebuilt before the next draw.
    Relist,
    /// A pending action was set; stop waiting and dispatch it.
    Dispatch,
}

/// Which line to select after a new listing arrives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Focus {
    /// The ".." line.
    Top,
    /// The previously selected entry if it is still there, else the clamped index.
    Keep,
    /// The entry with this name, else the ".." line.
    Name(OsString),
}

/// Holds the navigation, selection and flag state of the navigator.
#[derive(Debug)]
pub struct NavState {
    path: PathBuf,
    listing: Listing,
    selected: usize,
    show_hidden: bool,
    long_format: bool,
    pending: PendingAction,
}

impl NavState {
    pub fn new(path: PathBuf, show_hidden: bool, long_format: bool) -> Self {
        Self {
            path,
            listing: Listing::default(),
            selected: 0,
            show_hidden,
            long_format,
            pending: PendingAction::None,
        }
    }

    // Getters / Accessors

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    /// Index into the display lines; 0 is "..".
    #[inline]
    pub fn selected_idx(&self) -> usize {
        self.selected
    }

    #[inline]
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    #[inline]
    pub fn long_format(&self) -> bool {
        self.long_format
    }

    #[inline]
    pub fn pending(&self) -> PendingAction {
        self.pending
    }

    /// Number of selectable lines, ".." included.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.listing.len() + 1
    }

    /// The selected entry, `None` when ".." is selected.
    pub fn selected_entry(&self) -> Option<&Entry> {
        self.selected
            .checked_sub(1)
            .and_then(|idx| self.listing.get(idx))
    }

    // Navigation functions

    /// Moves the selection down by one line, wrapping to ".." after the last entry.
    pub fn move_down(&mut self) {
        self.selected = (self.selected + 1) % self.line_count();
    }

    /// Moves the selection up by one line, wrapping from ".." to the last entry.
    pub fn move_up(&mut self) {
        self.selected = match self.selected {
            0 => self.line_count() - 1,
            n => n - 1,
        };
    }

    /// Applies one action and reports what the loop has to do next.
    pub fn apply(&mut self, action: Action) -> Effect {
        match action {
            Action::Quit => self.request(PendingAction::Exit),
            Action::Help => self.request(PendingAction::Help),
            Action::Open => self.request(PendingAction::Open),
            Action::Parent => self.request(PendingAction::Parent),
            Action::Down => {
                self.move_down();
                Effect::Redraw
            }
            Action::Up => {
                self.move_up();
                Effect::Redraw
            }
            Action::ToggleHidden => {
                self.show_hidden = !self.show_hidden;
                Effect::Relist
            }
            Action::ToggleLong => {
                self.long_format = !self.long_format;
                Effect::Redraw
            }
        }
    }

    fn request(&mut self, pending: PendingAction) -> Effect {
        self.pending = pending;
        Effect::Dispatch
    }

    /// Returns the pending action and resets it.
    pub fn take_pending(&mut self) -> PendingAction {
        std::mem::take(&mut self.pending)
    }

    /// Changes the current directory. The listing is stale until [Self::set_listing].
    pub fn set_path(&mut self, path: PathBuf) {
        self.path = path;
    }

    /// Installs a fresh listing and picks the selection according to `focus`.
    pub fn set_listing(&mut self, listing: Listing, focus: Focus) {
        let (target, fallback) = match focus {
            Focus::Top => (None, 0),
            Focus::Name(name) => (Some(name), 0),
            Focus::Keep => (
                self.selected_entry().map(|e| e.name().to_os_string()),
                self.selected.min(listing.len()),
            ),
        };

        self.selected = target
            .and_then(|name| listing.position(&name))
            .map(|idx| idx + 1)
            .unwrap_or(fallback);
        self.listing = listing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn listing(names: &[&str]) -> Listing {
        Listing::new(
            names
                .iter()
                .map(|n| Entry::new(*n, 0, 0, None, "-rw-r--r--"))
                .collect(),
            0,
        )
    }

    fn nav_with(names: &[&str]) -> NavState {
        let mut nav = NavState::new(PathBuf::from("/a"), false, false);
        nav.set_listing(listing(names), Focus::Top);
        nav
    }

    #[test]
    fn wraparound_returns_to_start() {
        let mut rng = rand::rng();
        for _ in 0..50 {
            let n = rng.random_range(0..20usize);
            let names: Vec<String> = (0..n).map(|i| format!("f{i}")).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let mut nav = nav_with(&refs);
            for _ in 0..rng.random_range(0..=n) {
                nav.move_down();
            }
            let start = nav.selected_idx();

            for _ in 0..=n {
                nav.move_down();
            }
            assert_eq!(nav.selected_idx(), start, "down wrap with n={n}");

            for _ in 0..=n {
                nav.move_up();
            }
            assert_eq!(nav.selected_idx(), start, "up wrap with n={n}");
        }
    }

    #[test]
    fn up_from_parent_line_wraps_to_last() {
        let mut nav = nav_with(&["a", "b", "c"]);
        nav.move_up();
        assert_eq!(nav.selected_idx(), 3);
        assert_eq!(nav.selected_entry().map(|e| e.name_str().into_owned()), Some("c".to_string()));
        nav.move_down();
        assert_eq!(nav.selected_idx(), 0);
        assert!(nav.selected_entry().is_none());
    }

    #[test]
    fn empty_listing_stays_on_parent_line() {
        let mut nav = nav_with(&[]);
        nav.move_down();
        assert_eq!(nav.selected_idx(), 0);
        nav.move_up();
        assert_eq!(nav.selected_idx(), 0);
    }

    #[test]
    fn each_command_sets_at_most_one_pending_action() {
        let cases = [
            (Action::Quit, PendingAction::Exit),
            (Action::Help, PendingAction::Help),
            (Action::Open, PendingAction::Open),
            (Action::Parent, PendingAction::Parent),
        ];
        for (action, expected) in cases {
            let mut nav = nav_with(&["a"]);
            assert_eq!(nav.apply(action), Effect::Dispatch);
            assert_eq!(nav.take_pending(), expected);
            assert_eq!(nav.pending(), PendingAction::None);
        }

        let mut nav = nav_with(&["a"]);
        nav.apply(Action::Open);
        nav.apply(Action::Quit);
        assert_eq!(nav.take_pending(), PendingAction::Exit);
    }

    #[test]
    fn toggles_report_their_effect() {
        let mut nav = nav_with(&["a"]);
        assert_eq!(nav.apply(Action::ToggleHidden), Effect::Relist);
        assert!(nav.show_hidden());
        assert_eq!(nav.apply(Action::ToggleLong), Effect::Redraw);
        assert!(nav.long_format());
        assert_eq!(nav.apply(Action::Down), Effect::Redraw);
        assert_eq!(nav.pending(), PendingAction::None);
    }

    #[test]
    fn keep_focus_follows_the_selected_name() {
        let mut nav = nav_with(&["b", "d"]);
        nav.move_down();
        nav.move_down(); // "d"
        nav.set_listing(listing(&["a", "b", "c", "d"]), Focus::Keep);
        assert_eq!(nav.selected_idx(), 4);

        // the selected entry vanished, index is clamped
        nav.set_listing(listing(&["a"]), Focus::Keep);
        assert_eq!(nav.selected_idx(), 1);

        nav.set_listing(listing(&[]), Focus::Keep);
        assert_eq!(nav.selected_idx(), 0);
    }

    #[test]
    fn keep_focus_on_parent_line_stays_there() {
        let mut nav = nav_with(&["a", "b"]);
        nav.set_listing(listing(&["a", "b", "c"]), Focus::Keep);
        assert_eq!(nav.selected_idx(), 0);
    }

    #[test]
    fn name_focus_selects_entry_or_top() {
        let mut nav = nav_with(&[]);
        nav.set_listing(listing(&["x", "y", "z"]), Focus::Name(OsString::from("y")));
        assert_eq!(nav.selected_idx(), 2);
        nav.set_listing(listing(&["x"]), Focus::Name(OsString::from("gone")));
        assert_eq!(nav.selected_idx(), 0);
    }
}
