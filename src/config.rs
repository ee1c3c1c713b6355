//! Configuration for lsnav.
//!
//! Settings come from an optional `lsnav.toml` (see [load::Config::default_path]) and are
//! then overridden by command line flags:
//! - [general]: initial display flags and listing order.
//! - [input]: key bindings, editor and shell commands.
//! - [theme]: list, header and selection colours.

pub mod general;
pub mod input;
pub mod load;
pub mod theme;

pub use general::General;
pub use input::{EDITOR_ENV, Editor, Keys, SHELL_ENV, Shell};
pub use load::{Config, RawConfig};
pub use theme::Theme;
