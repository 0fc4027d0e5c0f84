#![forbid(unsafe_code)]

//! Line splitting and fixed-width row wrapping.
//!
//! Appended text is split into logical lines on `\r\n` and bare `\n` (a CRLF
//! is consumed as one separator; a lone `\r` stays in the line). Each logical
//! line is then cut into display rows of at most `width` characters.
//!
//! Wrapping counts raw `char`s, not display cells. A row holding wide
//! characters can therefore render wider than the pane and be truncated at
//! the right edge, and a double-width cluster can be split across two rows.
//! This is the engine's documented wrapping model; row records store byte
//! offsets that always fall on `char` boundaries, so slicing is safe.

use memchr::memchr_iter;

/// One display row: a byte range of a logical line.
///
/// `start` and `len` are byte offsets into the line's text and always lie on
/// `char` boundaries. An empty logical line is represented by exactly one
/// record with `len == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRecord {
    /// Index of the logical line this row belongs to.
    pub line: usize,
    /// Byte offset of the row's first character.
    pub start: usize,
    /// Byte length of the row.
    pub len: usize,
}

impl RowRecord {
    /// Resolve this row against its line's text.
    #[inline]
    #[must_use]
    pub fn slice<'a>(&self, line: &'a str) -> &'a str {
        &line[self.start..self.start + self.len]
    }
}

/// Split appended text into logical lines.
///
/// Returns at least one line; a trailing separator yields a trailing empty
/// line. `split_lines("")` is `[""]`.
#[must_use]
pub fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    for nl in memchr_iter(b'\n', bytes) {
        let mut end = nl;
        if end > start && bytes[end - 1] == b'\r' {
            end -= 1;
        }
        lines.push(&text[start..end]);
        start = nl + 1;
    }
    lines.push(&text[start..]);
    lines
}

/// Number of rows a line of `chars` characters occupies at `width`.
///
/// An empty line still occupies one row; `width` is clamped to 1.
#[inline]
#[must_use]
pub fn row_count(chars: usize, width: usize) -> usize {
    chars.max(1).div_ceil(width.max(1))
}

/// Append the row records for one logical line, cut every `width` characters.
pub fn push_rows(rows: &mut Vec<RowRecord>, line_index: usize, line: &str, width: usize) {
    let width = width.max(1);
    if line.is_empty() {
        rows.push(RowRecord {
            line: line_index,
            start: 0,
            len: 0,
        });
        return;
    }
    let mut start = 0;
    let mut count = 0;
    for (offset, _) in line.char_indices() {
        if count == width {
            rows.push(RowRecord {
                line: line_index,
                start,
                len: offset - start,
            });
            start = offset;
            count = 0;
        }
        count += 1;
    }
    rows.push(RowRecord {
        line: line_index,
        start,
        len: line.len() - start,
    });
}

/// Rebuild the full row index for `lines` at `width`, in line order.
#[must_use]
pub fn rebuild_rows<S: AsRef<str>>(lines: &[S], width: usize) -> Vec<RowRecord> {
    let mut rows = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        push_rows(&mut rows, index, line.as_ref(), width);
    }
    tracing::trace!(lines = lines.len(), rows = rows.len(), width, "rebuilt row index");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_for(line: &str, width: usize) -> Vec<RowRecord> {
        let mut rows = Vec::new();
        push_rows(&mut rows, 0, line, width);
        rows
    }

    #[test]
    fn splits_on_lf_and_crlf() {
        assert_eq!(split_lines("a\nb"), ["a", "b"]);
        assert_eq!(split_lines("a\r\nb"), ["a", "b"]);
        assert_eq!(split_lines("a\r\n\nb"), ["a", "", "b"]);
    }

    #[test]
    fn lone_cr_is_not_a_separator() {
        assert_eq!(split_lines("a\rb"), ["a\rb"]);
    }

    #[test]
    fn trailing_separator_yields_trailing_empty_line() {
        assert_eq!(split_lines("a\n"), ["a", ""]);
        assert_eq!(split_lines("a\r\n"), ["a", ""]);
    }

    #[test]
    fn empty_input_is_one_empty_line() {
        assert_eq!(split_lines(""), [""]);
    }

    #[test]
    fn wraps_every_width_chars() {
        let rows = rows_for("helloworldtest", 5);
        let texts: Vec<&str> = rows.iter().map(|r| r.slice("helloworldtest")).collect();
        assert_eq!(texts, ["hello", "world", "test"]);

        let rows = rows_for("helloworldtest", 10);
        let texts: Vec<&str> = rows.iter().map(|r| r.slice("helloworldtest")).collect();
        assert_eq!(texts, ["helloworld", "test"]);
    }

    #[test]
    fn exact_multiple_has_no_empty_tail_row() {
        let rows = rows_for("abcdef", 3);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].slice("abcdef"), "def");
    }

    #[test]
    fn empty_line_is_one_zero_length_row() {
        let rows = rows_for("", 80);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len, 0);
        assert_eq!(rows[0].slice(""), "");
    }

    #[test]
    fn multibyte_offsets_stay_on_char_boundaries() {
        let line = "日本語のテキスト";
        let rows = rows_for(line, 3);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].slice(line), "日本語");
        assert_eq!(rows[1].slice(line), "のテキ");
        assert_eq!(rows[2].slice(line), "スト");
    }

    #[test]
    fn zero_width_is_clamped_for_wrapping() {
        let rows = rows_for("abc", 0);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn row_count_matches_push_rows() {
        for (line, width) in [
            ("", 7),
            ("a", 1),
            ("helloworldtest", 5),
            ("abcdef", 3),
            ("abcdefg", 3),
            ("日本語のテキスト", 3),
        ] {
            assert_eq!(
                rows_for(line, width).len(),
                row_count(line.chars().count(), width),
                "{line:?} at {width}"
            );
        }
    }

    #[test]
    fn rebuild_covers_lines_in_order() {
        let lines = ["ab", "", "cdef"];
        let rows = rebuild_rows(&lines, 2);
        let owners: Vec<usize> = rows.iter().map(|r| r.line).collect();
        assert_eq!(owners, [0, 1, 2, 2]);
        assert_eq!(rows[3].slice(lines[2]), "ef");
    }
}
