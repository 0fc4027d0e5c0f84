#![forbid(unsafe_code)]

//! ANSI escape sequence helpers.
//!
//! Pure byte-generation functions for the small set of VT sequences the
//! surface emits. No state tracking here; the emitting surface owns the
//! diffing and style state.
//!
//! | Sequence | Meaning |
//! |----------|---------|
//! | `CSI row ; col H` | CUP, cursor position (1-indexed) |
//! | `CSI 2 J` | ED, erase whole display |
//! | `CSI 0 m` | SGR reset |
//! | `CSI 1 m` / `CSI 22 m` | bold on / off |
//! | `CSI ? 25 h` / `CSI ? 25 l` | cursor show / hide |

use std::io::{self, Write};

/// SGR reset: `CSI 0 m`.
pub const SGR_RESET: &[u8] = b"\x1b[0m";

/// Bold on: `CSI 1 m`.
pub const SGR_BOLD_ON: &[u8] = b"\x1b[1m";

/// Bold off: `CSI 22 m`.
pub const SGR_BOLD_OFF: &[u8] = b"\x1b[22m";

/// Erase the whole display: `CSI 2 J`.
pub const CLEAR_ALL: &[u8] = b"\x1b[2J";

/// Show the cursor: `CSI ? 25 h`.
pub const CURSOR_SHOW: &[u8] = b"\x1b[?25h";

/// Hide the cursor: `CSI ? 25 l`.
pub const CURSOR_HIDE: &[u8] = b"\x1b[?25l";

/// Cursor position: `CSI row ; col H` (input 0-indexed, wire 1-indexed).
pub fn cup<W: Write>(w: &mut W, row: u16, col: u16) -> io::Result<()> {
    write!(
        w,
        "\x1b[{};{}H",
        row.saturating_add(1),
        col.saturating_add(1)
    )
}

/// Write bold on or off.
#[inline]
pub fn sgr_bold<W: Write>(w: &mut W, on: bool) -> io::Result<()> {
    w.write_all(if on { SGR_BOLD_ON } else { SGR_BOLD_OFF })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_bytes(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> Vec<u8> {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        buf
    }

    #[test]
    fn cup_is_1_indexed() {
        assert_eq!(to_bytes(|w| cup(w, 0, 0)), b"\x1b[1;1H");
        assert_eq!(to_bytes(|w| cup(w, 23, 79)), b"\x1b[24;80H");
    }

    #[test]
    fn cup_saturates_at_u16_max() {
        let bytes = to_bytes(|w| cup(w, u16::MAX, u16::MAX));
        let s = String::from_utf8(bytes).unwrap();
        assert!(s.starts_with("\x1b["));
        assert!(s.ends_with('H'));
    }

    #[test]
    fn bold_toggles() {
        assert_eq!(to_bytes(|w| sgr_bold(w, true)), SGR_BOLD_ON);
        assert_eq!(to_bytes(|w| sgr_bold(w, false)), SGR_BOLD_OFF);
    }
}
