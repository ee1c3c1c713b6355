//! Command-line argument parsing for lsnav.
//!
//! `--help` and `--version` are answered by clap and exit 0 without entering the TUI.
//! `--init` writes a default config and exits, with a failure code if it refused or could
//! not write. Everything else starts the navigator.

use crate::config::Config;

use clap::Parser;
use std::path::{Path, PathBuf};

const AFTER_HELP: &str = r#"KEYS:
  j / k               move down / up (wraps around)
  h, Left             go to parent directory
  l, Right, Enter     open file/directory
  H                   toggle hidden files
  L                   toggle long format
  ?                   show key help
  q, Esc              exit and open a shell in the current directory

ENVIRONMENT:
  EDITOR              editor used when --editor and [editor] cmd are unset
  SHELL               shell started on exit
  LSNAV_CONFIG        override the default config path
"#;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "lsn",
    version,
    about = "Browse directories with single keys, then drop into a shell where you stopped",
    after_help = AFTER_HELP
)]
pub struct Args {
    /// Directory to start in
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// File editor (overrides [editor] cmd and $EDITOR)
    #[arg(long, value_name = "CMD")]
    pub editor: Option<String>,

    /// Show hidden files
    #[arg(short = 'a', long = "all")]
    pub show_hidden: bool,

    /// Long format
    #[arg(short = 'l', long = "long")]
    pub long_format: bool,

    /// Debug logging
    #[arg(long)]
    pub debug: bool,

    /// Generate a default configuration file and exit
    #[arg(long)]
    pub init: bool,
}

pub enum CliAction {
    Run(Args),
    Exit,
    Fail,
}

/// Parses the process arguments. Exits the process for help, version and usage errors.
pub fn handle_args() -> CliAction {
    let args = Args::parse();

    if args.init {
        return init_config(&Config::default_path());
    }
    CliAction::Run(args)
}

/// Writes the default config to `path`, refusing to overwrite an existing file.
pub fn init_config(path: &Path) -> CliAction {
    match Config::generate_default(path) {
        Ok(()) => CliAction::Exit,
        Err(e) => {
            eprintln!("[lsn] Error: {e}");
            CliAction::Fail
        }
    }
}
