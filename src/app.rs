//! Application layer of lsnav.
//!
//! - [keymap]: key events to [Action]s.
//! - [nav]: selection, flags and the pending action.
//! - [session]: the [Session] trait the loop renders and reads through.
//! - [state]: the [Navigator] loop itself.

pub mod keymap;
pub mod nav;
pub mod session;
pub mod state;

pub use keymap::{Action, Keymap};
pub use nav::{Effect, Focus, NavState, PendingAction};
pub use session::{Input, Session, View};
pub use state::{ExitReason, LoopExit, Navigator};
