#![forbid(unsafe_code)]

//! The shared drawing surface capability.
//!
//! Widgets do not own a terminal; they draw through a [`Surface`] handle
//! injected at construction. A surface is a character grid with a cursor
//! position and a `present` step that pushes accumulated changes to the
//! output. Implementations use interior mutability and are shared as
//! `Arc<S>` across widgets and threads; each widget writes only inside its
//! own screen area, so writes never contend on content.
//!
//! Two implementations exist: [`AnsiSurface`](crate::AnsiSurface) for real
//! terminals and [`MemorySurface`] for tests.

use std::io;
use std::sync::Mutex;

use crate::cell::Cell;
use crate::grid::{Grid, Slot};

/// A shared character grid that widgets draw into.
///
/// All methods take `&self`; implementations are internally synchronized.
/// Grid writes are total (out-of-bounds coordinates are ignored); only
/// `present` can fail, at the output boundary.
pub trait Surface: Send + Sync {
    /// Current grid size as (columns, rows).
    fn size(&self) -> (u16, u16);

    /// Resize the grid, discarding contents. The next `present` repaints
    /// from scratch.
    fn resize(&self, width: u16, height: u16);

    /// Place a cell.
    fn put(&self, x: u16, y: u16, cell: Cell);

    /// Clear one cell back to blank.
    fn clear_cell(&self, x: u16, y: u16);

    /// Park the terminal cursor, or hide it with `None`.
    fn set_cursor(&self, position: Option<(u16, u16)>);

    /// Push accumulated changes to the output.
    fn present(&self) -> io::Result<()>;
}

#[derive(Debug)]
struct MemoryInner {
    grid: Grid,
    cursor: Option<(u16, u16)>,
    puts: usize,
    presents: usize,
}

/// In-memory surface for tests.
///
/// Holds the same grid model as the terminal surface plus operation
/// counters, so tests can assert both what was drawn and how often.
#[derive(Debug)]
pub struct MemorySurface {
    inner: Mutex<MemoryInner>,
}

impl MemorySurface {
    /// Create a surface of the given size.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            inner: Mutex::new(MemoryInner {
                grid: Grid::new(width, height),
                cursor: None,
                puts: 0,
                presents: 0,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The visible text of row `y`, trailing blanks trimmed.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        self.lock().grid.row_text(y)
    }

    /// The cell at `(x, y)`, if one is present.
    #[must_use]
    pub fn cell(&self, x: u16, y: u16) -> Option<Cell> {
        match self.lock().grid.slot(x, y) {
            Slot::Glyph(cell) => Some(cell.clone()),
            _ => None,
        }
    }

    /// Where the cursor was parked, or `None` if hidden.
    #[must_use]
    pub fn cursor(&self) -> Option<(u16, u16)> {
        self.lock().cursor
    }

    /// Total `put` calls so far.
    #[must_use]
    pub fn put_count(&self) -> usize {
        self.lock().puts
    }

    /// Total `present` calls so far.
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.lock().presents
    }
}

impl Surface for MemorySurface {
    fn size(&self) -> (u16, u16) {
        let inner = self.lock();
        (inner.grid.width(), inner.grid.height())
    }

    fn resize(&self, width: u16, height: u16) {
        self.lock().grid.resize(width, height);
    }

    fn put(&self, x: u16, y: u16, cell: Cell) {
        let mut inner = self.lock();
        inner.grid.put(x, y, cell);
        inner.puts += 1;
    }

    fn clear_cell(&self, x: u16, y: u16) {
        self.lock().grid.clear_cell(x, y);
    }

    fn set_cursor(&self, position: Option<(u16, u16)>) {
        self.lock().cursor = position;
    }

    fn present(&self) -> io::Result<()> {
        self.lock().presents += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_and_reads_back() {
        let surface = MemorySurface::new(10, 2);
        for (i, c) in "hi".chars().enumerate() {
            surface.put(i as u16, 0, Cell::plain(c));
        }
        assert_eq!(surface.row_text(0), "hi");
        assert_eq!(surface.row_text(1), "");
        assert_eq!(surface.put_count(), 2);
    }

    #[test]
    fn clear_cell_blanks_one_position() {
        let surface = MemorySurface::new(4, 1);
        surface.put(0, 0, Cell::plain('a'));
        surface.put(1, 0, Cell::plain('b'));
        surface.clear_cell(0, 0);
        assert_eq!(surface.row_text(0), " b");
    }

    #[test]
    fn cursor_round_trips() {
        let surface = MemorySurface::new(4, 4);
        assert_eq!(surface.cursor(), None);
        surface.set_cursor(Some((2, 3)));
        assert_eq!(surface.cursor(), Some((2, 3)));
        surface.set_cursor(None);
        assert_eq!(surface.cursor(), None);
    }

    #[test]
    fn present_only_counts() {
        let surface = MemorySurface::new(4, 1);
        surface.put(0, 0, Cell::plain('a'));
        surface.present().unwrap();
        surface.present().unwrap();
        assert_eq!(surface.present_count(), 2);
        assert_eq!(surface.row_text(0), "a");
    }

    #[test]
    fn resize_discards_contents() {
        let surface = MemorySurface::new(4, 1);
        surface.put(0, 0, Cell::plain('a'));
        surface.resize(8, 2);
        assert_eq!(surface.size(), (8, 2));
        assert_eq!(surface.row_text(0), "");
    }
}
