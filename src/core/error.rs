//! Error types for lsnav.
//!
//! Every fallible operation in the crate returns [NavError]. Which variants are fatal
//! depends on where they surface:
//! - [NavError::Metadata] never leaves a listing; the entry is logged and skipped.
//! - [NavError::Listing], [NavError::PathResolution] and [NavError::Terminal] end the
//!   navigation loop, after which the shell handoff still runs.
//! - The external process variants are non-fatal for the editor and fatal for the shell.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NavError>;

#[derive(Debug, Error)]
pub enum NavError {
    #[error("cannot list directory '{}': {source}", path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read metadata of '{}': {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot resolve absolute path of '{}': {source}", path.display())]
    PathResolution {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no {0} configured")]
    NotConfigured(&'static str),

    #[error("cannot locate '{program}': {source}")]
    NotFound {
        program: String,
        #[source]
        source: which::Error,
    },

    #[error("cannot run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{program}' exited with {status}")]
    ExitStatus { program: String, status: ExitStatus },

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

impl NavError {
    pub(crate) fn listing(path: impl Into<PathBuf>, source: io::Error) -> Self {
        NavError::Listing {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn resolution(path: impl Into<PathBuf>, source: io::Error) -> Self {
        NavError::PathResolution {
            path: path.into(),
            source,
        }
    }

    /// True for the variants raised while launching an editor or shell.
    pub fn is_external_process(&self) -> bool {
        matches!(
            self,
            NavError::NotConfigured(_)
                | NavError::NotFound { .. }
                | NavError::Spawn { .. }
                | NavError::ExitStatus { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_error_mentions_path() {
        let err = NavError::listing(
            "/gone",
            io::Error::new(io::ErrorKind::NotFound, "no such dir"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/gone"), "unexpected message: {msg}");
        assert!(!err.is_external_process());
    }

    #[test]
    fn process_variants_are_classified() {
        assert!(NavError::NotConfigured("editor").is_external_process());
        let spawn = NavError::Spawn {
            program: "vim".into(),
            source: io::Error::other("boom"),
        };
        assert!(spawn.is_external_process());
        assert!(!NavError::Terminal(io::Error::other("tty")).is_external_process());
    }
}
