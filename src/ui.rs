//! Terminal UI of lsnav. See [render].

pub mod render;

pub use render::{render, render_help};
