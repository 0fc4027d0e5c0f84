#![forbid(unsafe_code)]

//! Glyph cluster segmentation.
//!
//! A [`Cluster`] is the unit a terminal cell displays: one base character of
//! width 1 or 2 plus any trailing zero-width characters (combining marks) and
//! ZWJ-joined continuations. Segmentation is a small merge machine over
//! `char`s, not full UAX #29 grapheme breaking:
//!
//! - A ZWJ (`U+200D`) joins into the open cluster (opening a blank-anchored
//!   one if none is open) and absorbs exactly the next character, whatever
//!   its intrinsic width.
//! - A zero-width character joins into the open cluster, or opens a
//!   blank-anchored cluster of width 1 when it arrives first.
//! - Any other character closes the open cluster and starts a new one of its
//!   intrinsic width.
//!
//! Every emitted cluster has width 1 or 2; zero-width input never yields a
//! zero-width cluster.
//!
//! # Example
//! ```
//! use tpane_text::{Clusters, display_width};
//!
//! // A ZWJ emoji sequence is one cluster, two cells wide.
//! let mut clusters = Clusters::new("\u{1F469}\u{200D}\u{1F680}");
//! let cluster = clusters.next().unwrap();
//! assert_eq!(cluster.width(), 2);
//! assert!(clusters.next().is_none());
//!
//! assert_eq!(display_width("ab\u{0301}c"), 3);
//! ```

use smallvec::SmallVec;
use unicode_width::UnicodeWidthChar;

/// Zero-width joiner.
pub const ZWJ: char = '\u{200D}';

/// One displayable glyph cluster: a base character plus trailing zero-width
/// and ZWJ-joined characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    chars: SmallVec<[char; 4]>,
    width: u8,
}

impl Cluster {
    fn new(base: char, width: u8) -> Self {
        let mut chars = SmallVec::new();
        chars.push(base);
        Self { chars, width }
    }

    /// A synthetic cluster anchoring zero-width input that has nothing to
    /// attach to: a blank of width 1.
    fn blank() -> Self {
        Self::new(' ', 1)
    }

    /// The base character (always present).
    #[inline]
    #[must_use]
    pub fn base(&self) -> char {
        self.chars[0]
    }

    /// Characters following the base (zero-width marks, ZWJ sequences).
    #[inline]
    #[must_use]
    pub fn trailing(&self) -> &[char] {
        &self.chars[1..]
    }

    /// All characters of the cluster, base first.
    #[inline]
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Display width in cells: 1 or 2.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u8 {
        self.width
    }
}

/// Iterator producing [`Cluster`]s from a string.
#[derive(Debug, Clone)]
pub struct Clusters<'a> {
    chars: std::str::Chars<'a>,
    open: Option<Cluster>,
    join_pending: bool,
}

impl<'a> Clusters<'a> {
    /// Segment `text` into clusters.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
            open: None,
            join_pending: false,
        }
    }
}

impl Iterator for Clusters<'_> {
    type Item = Cluster;

    fn next(&mut self) -> Option<Cluster> {
        loop {
            let Some(c) = self.chars.next() else {
                // End of input flushes whatever is open.
                return self.open.take();
            };

            if c == ZWJ {
                self.open.get_or_insert_with(Cluster::blank).chars.push(c);
                self.join_pending = true;
                continue;
            }

            if self.join_pending {
                // A ZWJ absorbs exactly one following character.
                if let Some(open) = self.open.as_mut() {
                    open.chars.push(c);
                }
                self.join_pending = false;
                continue;
            }

            match char_width(c) {
                0 => {
                    self.open.get_or_insert_with(Cluster::blank).chars.push(c);
                }
                width => {
                    let next = Cluster::new(c, width);
                    if let Some(closed) = self.open.replace(next) {
                        return Some(closed);
                    }
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.chars.size_hint();
        // Each remaining char can emit at most one cluster, plus the open one.
        (0, upper.map(|n| n + usize::from(self.open.is_some())))
    }
}

/// Intrinsic width of one character in cells: 0, 1, or 2.
///
/// Non-printing characters (controls, unassigned) count as 0 and ride along
/// inside a cluster like combining marks.
#[inline]
#[must_use]
pub fn char_width(c: char) -> u8 {
    match c.width() {
        Some(2) => 2,
        Some(1) => 1,
        _ => 0,
    }
}

/// Display width of a string in cells: the sum of its cluster widths.
#[must_use]
pub fn display_width(text: &str) -> usize {
    Clusters::new(text).map(|c| usize::from(c.width())).sum()
}
