#![forbid(unsafe_code)]

//! The cell model.
//!
//! A [`Cell`] is one occupied grid position: a base character, any trailing
//! zero-width or ZWJ-joined characters, a display width of 1 or 2, and the
//! single emphasis bit the engine supports. A width-2 cell occupies its own
//! column plus the one to its right; the grid marks the covered column as a
//! continuation with no cell of its own.

use smallvec::SmallVec;
use tpane_text::Cluster;

/// One occupied grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// The base character.
    pub base: char,
    /// Zero-width marks and ZWJ-joined characters following the base.
    pub trailing: SmallVec<[char; 2]>,
    /// Display width in columns: 1 or 2.
    pub width: u8,
    /// Emphasis flag (rendered as SGR bold).
    pub bold: bool,
}

impl Cell {
    /// A plain width-1 character cell.
    #[must_use]
    pub fn plain(base: char) -> Self {
        Self {
            base,
            trailing: SmallVec::new(),
            width: 1,
            bold: false,
        }
    }

    /// A cell holding a segmented glyph cluster.
    #[must_use]
    pub fn from_cluster(cluster: &Cluster, bold: bool) -> Self {
        Self {
            base: cluster.base(),
            trailing: cluster.trailing().iter().copied().collect(),
            width: cluster.width(),
            bold,
        }
    }

    /// Set the emphasis flag.
    #[must_use]
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Append the cell's characters to `out`, base first.
    pub fn write_chars(&self, out: &mut String) {
        out.push(self.base);
        out.extend(self.trailing.iter());
    }
}
