//! Display formatting for directory entries.
//!
//! Turns a [Listing] into the lines the list widget shows: the synthetic ".." line first,
//! then one line per entry, either the bare name or an `ls -l` style composite.
//! Also owns the size, date and permission-mode formatters used by the long view.

use crate::core::fm::{Entry, Listing};

use chrono::{DateTime, Datelike, Local, Utc};
use unicode_width::UnicodeWidthChar;

use std::fs::Metadata;
use std::time::{SystemTime, UNIX_EPOCH};

/// Name of the synthetic parent line shown at index 0.
pub const PARENT_LINE: &str = "..";
/// Emitted when a size does not fit any unit.
pub const UNKNOWN_SIZE: &str = "??";

const SIZE_UNITS: [&str; 6] = ["", "K", "M", "G", "T", "P"];

/// Visual category of a line, consumed by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStyle {
    Parent,
    Plain,
    Directory,
    Symlink,
    Setuid,
}

impl EntryStyle {
    /// Classifies an entry. Rules apply in the order directory, symlink, setuid and the
    /// last matching one wins.
    pub fn classify(entry: &Entry) -> Self {
        let mut style = EntryStyle::Plain;
        if entry.is_dir() {
            style = EntryStyle::Directory;
        }
        if entry.is_symlink() {
            style = EntryStyle::Symlink;
        }
        if entry.is_setuid() {
            style = EntryStyle::Setuid;
        }
        style
    }
}

/// One rendered row of the list.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayLine {
    pub text: String,
    pub style: EntryStyle,
}

/// Builds the display lines for a listing, ".." first.
pub fn display_lines(
    listing: &Listing,
    long_format: bool,
    now: &DateTime<Local>,
) -> Vec<DisplayLine> {
    let mut lines = Vec::with_capacity(listing.len() + 1);
    lines.push(DisplayLine {
        text: PARENT_LINE.to_string(),
        style: EntryStyle::Parent,
    });

    lines.extend(listing.entries().iter().map(|entry| DisplayLine {
        text: if long_format {
            long_line(entry, now)
        } else {
            entry.name_str().into_owned()
        },
        style: EntryStyle::classify(entry),
    }));
    lines
}

/// Long view of an entry: mode, size, date and name in fixed-width columns.
pub fn long_line(entry: &Entry, now: &DateTime<Local>) -> String {
    format!(
        "{} {:>4} {:>12} {}",
        entry.mode(),
        format_size(entry.size()),
        format_mod_time(entry.modified(), now),
        entry.name_str()
    )
}

/// Human readable size with truncating division by 1024.
///
/// 1536 renders as "1K", not "2K". Sizes beyond the petabyte range render [UNKNOWN_SIZE].
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes;
    for unit in SIZE_UNITS {
        if size < 1024 {
            return format!("{size}{unit}");
        }
        size /= 1024;
    }
    UNKNOWN_SIZE.to_string()
}

/// Formats a modification time relative to `now`.
///
/// Same year shows the time of day, older or future years show the year instead.
/// Times chrono cannot represent render as "-".
pub fn format_mod_time(modified: Option<SystemTime>, now: &DateTime<Local>) -> String {
    modified
        .and_then(to_local)
        .map(|dt| {
            if dt.year() == now.year() {
                dt.format("%b %d %H:%M").to_string()
            } else {
                dt.format("%b %d %Y").to_string()
            }
        })
        .unwrap_or_else(|| "-".to_string())
}

fn to_local(mtime: SystemTime) -> Option<DateTime<Local>> {
    let utc = match mtime.duration_since(UNIX_EPOCH) {
        Ok(after) => {
            let secs = i64::try_from(after.as_secs()).ok()?;
            DateTime::<Utc>::from_timestamp(secs, after.subsec_nanos())?
        }
        Err(e) => {
            let before = e.duration();
            let secs = i64::try_from(before.as_secs()).ok()?;
            // round down to whole seconds before the epoch
            let (secs, nanos) = match before.subsec_nanos() {
                0 => (-secs, 0),
                n => (-secs - 1, 1_000_000_000 - n),
            };
            DateTime::<Utc>::from_timestamp(secs, nanos)?
        }
    };
    Some(utc.with_timezone(&Local))
}

/// Formats permission and type bits in `ls` style, e.g. `drwxr-xr-x` or `-rwsr-xr-x`.
pub fn format_mode(meta: &Metadata) -> String {
    #[cfg(unix)]
    {
        use std::os::unix::fs::{FileTypeExt, PermissionsExt};

        let ft = meta.file_type();
        let first = if ft.is_dir() {
            'd'
        } else if ft.is_symlink() {
            'l'
        } else if ft.is_fifo() {
            'p'
        } else if ft.is_socket() {
            's'
        } else if ft.is_char_device() {
            'c'
        } else if ft.is_block_device() {
            'b'
        } else {
            '-'
        };
        mode_string(first, meta.permissions().mode())
    }
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        let attr = meta.file_attributes();
        let mut out = String::with_capacity(5);
        out.push(if attr & 0x10 != 0 {
            'd'
        } else if attr & 0x400 != 0 {
            'l'
        } else {
            '-'
        });
        out.push(if attr & 0x02 != 0 { 'h' } else { '-' });
        out.push(if attr & 0x04 != 0 { 's' } else { '-' });
        out.push(if attr & 0x20 != 0 { 'a' } else { '-' });
        out.push(if attr & 0x01 != 0 { 'r' } else { '-' });
        out
    }
}

/// Renders the nine permission characters plus setuid, setgid and sticky.
pub(crate) fn mode_string(first: char, mode: u32) -> String {
    let mut chars = [first, '-', '-', '-', '-', '-', '-', '-', '-', '-'];
    // (shift, special bit, lowercase, uppercase)
    let triplets = [
        (6, 0o4000, 's', 'S'),
        (3, 0o2000, 's', 'S'),
        (0, 0o1000, 't', 'T'),
    ];
    for (i, &(shift, special, set_x, unset_x)) in triplets.iter().enumerate() {
        let base = 1 + i * 3;
        if (mode >> (shift + 2)) & 1 != 0 {
            chars[base] = 'r';
        }
        if (mode >> (shift + 1)) & 1 != 0 {
            chars[base + 1] = 'w';
        }
        let exec = (mode >> shift) & 1 != 0;
        chars[base + 2] = match (mode & special != 0, exec) {
            (true, true) => set_x,
            (true, false) => unset_x,
            (false, true) => 'x',
            (false, false) => '-',
        };
    }
    chars.iter().collect()
}

/// Strips control characters and cuts the line to `max_width` columns.
///
/// Filenames may contain anything but a newline or escape sequence must never reach the
/// terminal.
pub fn sanitize_to_width(line: &str, max_width: usize) -> String {
    let mut out = String::with_capacity(line.len().min(max_width));
    let mut current_w = 0;

    for ch in line.chars() {
        let ch = if ch == '\t' { ' ' } else { ch };
        if ch.is_control() {
            continue;
        }
        let w = ch.width().unwrap_or(0);
        if current_w + w > max_width {
            break;
        }
        out.push(ch);
        current_w += w;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::Duration;

    fn local(
        y: i32,
        m: u32,
        d: u32,
        h: u32,
        min: u32,
    ) -> Result<DateTime<Local>, Box<dyn std::error::Error>> {
        Local
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .single()
            .ok_or_else(|| "ambiguous local time".into())
    }

    #[test]
    fn size_formatting_truncates() {
        assert_eq!(format_size(0), "0");
        assert_eq!(format_size(1023), "1023");
        assert_eq!(format_size(1024), "1K");
        assert_eq!(format_size(1536), "1K");
        assert_eq!(format_size(5 * 1024 * 1024 + 1), "5M");
        assert_eq!(format_size(1024u64.pow(5)), "1P");
        assert_eq!(format_size(1024u64.pow(6)), UNKNOWN_SIZE);
        assert_eq!(format_size(u64::MAX), UNKNOWN_SIZE);
    }

    #[test]
    fn date_uses_time_for_current_year() -> Result<(), Box<dyn std::error::Error>> {
        let now = local(2024, 11, 20, 9, 0)?;
        let mtime = SystemTime::from(local(2024, 3, 5, 14, 7)?);
        assert_eq!(format_mod_time(Some(mtime), &now), "Mar 05 14:07");
        Ok(())
    }

    #[test]
    fn date_uses_year_for_other_years() -> Result<(), Box<dyn std::error::Error>> {
        let now = local(2024, 11, 20, 9, 0)?;
        let mtime = SystemTime::from(local(2019, 3, 5, 14, 7)?);
        assert_eq!(format_mod_time(Some(mtime), &now), "Mar 05 2019");
        assert_eq!(format_mod_time(None, &now), "-");
        Ok(())
    }

    #[test]
    fn unrepresentable_date_renders_dash() {
        let far = UNIX_EPOCH + Duration::from_secs(1 << 44);
        assert_eq!(format_mod_time(Some(far), &Local::now()), "-");

        let listing = Listing::new(vec![Entry::new("f", 0, 1, Some(far), "-rw-r--r--")], 0);
        let lines = display_lines(&listing, true, &Local::now());
        assert_eq!(lines[1].text, format!("-rw-r--r--    1 {:>12} f", "-"));
    }

    #[test]
    fn pre_epoch_date_is_formatted() -> Result<(), Box<dyn std::error::Error>> {
        let now = local(2024, 11, 20, 9, 0)?;
        let mtime = SystemTime::from(local(1965, 7, 1, 12, 0)?);
        assert_eq!(format_mod_time(Some(mtime), &now), "Jul 01 1965");
        Ok(())
    }

    #[test]
    fn mode_string_renders_special_bits() {
        assert_eq!(mode_string('d', 0o755), "drwxr-xr-x");
        assert_eq!(mode_string('-', 0o644), "-rw-r--r--");
        assert_eq!(mode_string('-', 0o4755), "-rwsr-xr-x");
        assert_eq!(mode_string('-', 0o4644), "-rwSr--r--");
        assert_eq!(mode_string('d', 0o1777), "drwxrwxrwt");
        assert_eq!(mode_string('-', 0o2750), "-rwxr-s---");
    }

    #[test]
    fn classification_last_rule_wins() {
        let plain = Entry::new("a", 0, 0, None, "");
        let dir = Entry::new("d", Entry::IS_DIR, 0, None, "");
        let link = Entry::new("l", Entry::IS_DIR | Entry::IS_SYMLINK, 0, None, "");
        let all = Entry::IS_DIR | Entry::IS_SYMLINK | Entry::IS_SETUID;
        let suid = Entry::new("s", all, 0, None, "");

        assert_eq!(EntryStyle::classify(&plain), EntryStyle::Plain);
        assert_eq!(EntryStyle::classify(&dir), EntryStyle::Directory);
        assert_eq!(EntryStyle::classify(&link), EntryStyle::Symlink);
        assert_eq!(EntryStyle::classify(&suid), EntryStyle::Setuid);
    }

    #[test]
    fn display_lines_start_with_parent() -> Result<(), Box<dyn std::error::Error>> {
        let now = local(2024, 6, 1, 12, 0)?;
        let mtime = SystemTime::from(local(2024, 1, 2, 3, 4)?);
        let listing = Listing::new(
            vec![
                Entry::new("src", Entry::IS_DIR, 4096, Some(mtime), "drwxr-xr-x"),
                Entry::new("big.iso", 0, 3 * 1024 * 1024 * 1024, Some(mtime), "-rw-r--r--"),
            ],
            0,
        );

        let short = display_lines(&listing, false, &now);
        assert_eq!(short.len(), 3);
        assert_eq!(short[0].text, "..");
        assert_eq!(short[0].style, EntryStyle::Parent);
        assert_eq!(short[1].text, "src");
        assert_eq!(short[1].style, EntryStyle::Directory);
        assert_eq!(short[2].text, "big.iso");

        let long = display_lines(&listing, true, &now);
        assert_eq!(long[0].text, "..");
        assert_eq!(long[1].text, "drwxr-xr-x   4K Jan 02 03:04 src");
        assert_eq!(long[2].text, "-rw-r--r--   3G Jan 02 03:04 big.iso");
        Ok(())
    }

    #[test]
    fn sanitize_strips_controls_and_truncates() {
        assert_eq!(sanitize_to_width("evil\x1b[2Jname", 40), "evil[2Jname");
        assert_eq!(sanitize_to_width("very_long_filename.txt", 9), "very_long");
        assert_eq!(sanitize_to_width("a\tb", 10), "a b");
        assert_eq!(sanitize_to_width("🦀🦀🦀", 5), "🦀🦀");
    }
}
