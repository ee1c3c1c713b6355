//! The general configuration settings for lsnav.
//!
//! Initial display flags and listing order, read from the `[general]` table.

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct General {
    show_hidden: bool,
    long_format: bool,
    sort_by_name: bool,
}

impl Default for General {
    fn default() -> Self {
        General {
            show_hidden: false,
            long_format: false,
            sort_by_name: true,
        }
    }
}

impl General {
    #[inline]
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    #[inline]
    pub fn long_format(&self) -> bool {
        self.long_format
    }

    #[inline]
    pub fn sort_by_name(&self) -> bool {
        self.sort_by_name
    }

    pub(crate) fn set_show_hidden(&mut self, on: bool) {
        self.show_hidden = on;
    }

    pub(crate) fn set_long_format(&mut self, on: bool) {
        self.long_format = on;
    }
}
