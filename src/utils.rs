//! Miscellaneous utility functions for lsnav.
//!
//! - [cli]: command line parsing.
//! - [helpers]: colour parsing, path resolution, home shortening and log setup.

pub mod cli;
pub mod helpers;

pub use helpers::{
    absolutize, get_home, init_logging, log_file_path, parent_dir, parse_color,
    shorten_home_path,
};
