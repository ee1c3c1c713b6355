//! Directory listing for lsnav.
//!
//! Provides the [Entry] snapshot and the [Listing] produced by [list_dir].
//! Entries are taken with lstat semantics: a symlink to a directory is a symlink, not a
//! directory. Whether "open" descends or edits is decided later against the live filesystem.

use crate::core::error::{NavError, Result};
use crate::core::formatter::format_mode;

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fs::{self, Metadata};
use std::io;
use std::path::Path;
use std::time::SystemTime;

use tracing::{debug, warn};

/// Snapshot of a single directory child, taken at listing time.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    name: Box<OsStr>,
    flags: u8,
    size: u64,
    modified: Option<SystemTime>,
    mode: String,
}

impl Entry {
    // Flag bit definitions
    pub const IS_DIR: u8 = 1 << 0;
    pub const IS_SYMLINK: u8 = 1 << 1;
    pub const IS_SETUID: u8 = 1 << 2;

    #[cfg(unix)]
    const SETUID_BIT: u32 = 0o4000;

    pub fn new(
        name: impl Into<OsString>,
        flags: u8,
        size: u64,
        modified: Option<SystemTime>,
        mode: impl Into<String>,
    ) -> Self {
        Entry {
            name: name.into().into_boxed_os_str(),
            flags,
            size,
            modified,
            mode: mode.into(),
        }
    }

    /// Builds an entry from lstat metadata.
    pub fn from_metadata(name: OsString, md: &Metadata) -> Self {
        let ft = md.file_type();
        let mut flags = 0u8;
        if ft.is_dir() {
            flags |= Self::IS_DIR;
        }
        if ft.is_symlink() {
            flags |= Self::IS_SYMLINK;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if md.permissions().mode() & Self::SETUID_BIT != 0 {
                flags |= Self::IS_SETUID;
            }
        }

        Entry::new(name, flags, md.len(), md.modified().ok(), format_mode(md))
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn name_str(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.flags & Self::IS_DIR != 0
    }

    #[inline]
    pub fn is_symlink(&self) -> bool {
        self.flags & Self::IS_SYMLINK != 0
    }

    #[inline]
    pub fn is_setuid(&self) -> bool {
        self.flags & Self::IS_SETUID != 0
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        is_hidden_name(&self.name)
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    #[inline]
    pub fn mode(&self) -> &str {
        &self.mode
    }
}

/// Entries of one directory at one point in time.
///
/// The synthetic ".." line is not stored here; it is always index 0 of the display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    entries: Vec<Entry>,
    skipped: usize,
}

impl Listing {
    pub fn new(entries: Vec<Entry>, skipped: usize) -> Self {
        Listing { entries, skipped }
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of children dropped because their metadata could not be read.
    #[inline]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn get(&self, idx: usize) -> Option<&Entry> {
        self.entries.get(idx)
    }

    pub fn position(&self, name: &OsStr) -> Option<usize> {
        self.entries.iter().position(|e| e.name() == name)
    }

    fn sort_by_name(&mut self) {
        self.entries.sort_by(|a, b| a.name().cmp(b.name()));
    }
}

fn is_hidden_name(name: &OsStr) -> bool {
    name.as_encoded_bytes().first() == Some(&b'.')
}

/// Reads the immediate children of `path`.
///
/// Dot-prefixed names are dropped unless `show_hidden` is set. A failing top-level read is
/// returned as [NavError::Listing]; a failing per-entry stat is logged and counted in
/// [Listing::skipped].
pub fn list_dir(path: &Path, show_hidden: bool, sort_by_name: bool) -> Result<Listing> {
    let read = fs::read_dir(path).map_err(|e| NavError::listing(path, e))?;

    let mut unreadable = 0usize;
    let children = read.filter_map(|entry| match entry {
        Ok(entry) => Some((entry.file_name(), entry.metadata())),
        Err(e) => {
            warn!(dir = %path.display(), error = %e, "skipping unreadable directory entry");
            unreadable += 1;
            None
        }
    });

    let mut listing = build_listing(path, children, show_hidden);
    listing.skipped += unreadable;
    if sort_by_name {
        listing.sort_by_name();
    }

    debug!(
        dir = %path.display(),
        entries = listing.len(),
        skipped = listing.skipped,
        show_hidden,
        "listed directory"
    );
    Ok(listing)
}

/// Turns raw `(name, metadata)` pairs into a [Listing], keeping their order.
pub(crate) fn build_listing<I>(dir: &Path, children: I, show_hidden: bool) -> Listing
where
    I: IntoIterator<Item = (OsString, io::Result<Metadata>)>,
{
    let mut listing = Listing::default();

    for (name, md) in children {
        if !show_hidden && is_hidden_name(&name) {
            continue;
        }
        match md {
            Ok(md) => listing.entries.push(Entry::from_metadata(name, &md)),
            Err(source) => {
                let err = NavError::Metadata {
                    path: dir.join(&name),
                    source,
                };
                warn!("{err}");
                listing.skipped += 1;
            }
        }
    }
    listing
}
