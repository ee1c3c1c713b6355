//! main.rs
//! Entry point for lsnav

use lsnav::app::{ExitReason, LoopExit, Navigator};
use lsnav::config::Config;
use lsnav::core::{Handoff, NavError, TerminalSession, handoff};
use lsnav::utils::cli::{CliAction, handle_args};
use lsnav::utils::{absolutize, init_logging};

use std::process::ExitCode;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[lsn] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let args = match handle_args() {
        CliAction::Exit => return ExitCode::SUCCESS,
        CliAction::Fail => return ExitCode::FAILURE,
        CliAction::Run(args) => args,
    };

    let log_file = init_logging(args.debug);
    info!(version = env!("CARGO_PKG_VERSION"), log = ?log_file, "starting lsn");

    let mut config = Config::load();
    config.apply_args(&args);

    let start = absolutize(&args.path).unwrap_or_else(|e| {
        warn!("{e}, using the path as given");
        args.path.clone()
    });
    if !start.is_dir() {
        eprintln!("\n[lsn] Error: Path '{}' cannot be opened.", args.path.display());
        return ExitCode::FAILURE;
    }

    let exit = navigate(&config, start);
    if let ExitReason::Failed(e) = &exit.reason {
        eprintln!("[lsn] Error: {e}");
    }

    match handoff(&exit.path, &config.shell_cmd()) {
        Ok(Handoff::Skipped) => ExitCode::SUCCESS,
        Ok(Handoff::Exited(code)) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            error!("shell handoff failed: {e}");
            eprintln!("[lsn] Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Runs the navigator inside a terminal session and restores the terminal afterwards.
fn navigate(config: &Config, start: std::path::PathBuf) -> LoopExit {
    let session = match TerminalSession::enter(config.theme()) {
        Ok(session) => session,
        Err(e) => {
            error!("cannot set up terminal: {e}");
            return LoopExit {
                path: start,
                reason: ExitReason::Failed(NavError::Terminal(e)),
            };
        }
    };

    let mut navigator = Navigator::new(config, start, session);
    let exit = navigator.run();

    if let Err(e) = navigator.into_session().restore() {
        warn!("terminal restore failed: {e}");
    }
    exit
}
