#![forbid(unsafe_code)]

//! Cell grid storage.
//!
//! A [`Grid`] is a dense `width x height` array of [`Slot`]s. Writes are
//! total: out-of-bounds coordinates are ignored. Placing or clearing a cell
//! repairs wide-cell pairs so the grid never holds a continuation without
//! its owner or an owner whose continuation was stolen.

use crate::cell::Cell;

/// One grid position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Slot {
    /// Nothing here; renders as a blank.
    #[default]
    Empty,
    /// An occupied cell.
    Glyph(Cell),
    /// Column covered by the width-2 cell immediately to the left.
    Continuation,
}

impl Slot {
    /// Whether this slot renders any characters of its own.
    #[inline]
    #[must_use]
    pub fn is_glyph(&self) -> bool {
        matches!(self, Self::Glyph(_))
    }
}

/// Dense cell grid with wide-cell bookkeeping.
#[derive(Debug, Clone)]
pub struct Grid {
    width: u16,
    height: u16,
    slots: Vec<Slot>,
}

impl Grid {
    /// Create an empty grid.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            slots: vec![Slot::Empty; usize::from(width) * usize::from(height)],
        }
    }

    /// Grid width in columns.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Grid height in rows.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the grid, discarding all contents.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.slots.clear();
        self.slots
            .resize(usize::from(width) * usize::from(height), Slot::Empty);
    }

    /// Clear every slot.
    pub fn clear(&mut self) {
        self.slots.fill(Slot::Empty);
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(usize::from(y) * usize::from(self.width) + usize::from(x))
        } else {
            None
        }
    }

    /// The slot at `(x, y)`, or `Empty` when out of bounds.
    #[must_use]
    pub fn slot(&self, x: u16, y: u16) -> &Slot {
        self.index(x, y).map_or(&Slot::Empty, |i| &self.slots[i])
    }

    /// Place a cell. A width-2 cell also claims the column to its right;
    /// at the last column the overhang is clipped.
    pub fn put(&mut self, x: u16, y: u16, cell: Cell) {
        let Some(index) = self.index(x, y) else {
            return;
        };
        self.release(x, y);
        let wide = cell.width == 2;
        self.slots[index] = Slot::Glyph(cell);
        if wide {
            if let Some(next) = self.index(x + 1, y) {
                self.release(x + 1, y);
                self.slots[next] = Slot::Continuation;
            }
        }
    }

    /// Clear the slot at `(x, y)`.
    pub fn clear_cell(&mut self, x: u16, y: u16) {
        if self.index(x, y).is_some() {
            self.release(x, y);
        }
    }

    /// Empty a slot and repair its wide-cell partner: clearing an owner
    /// drops its continuation, clearing a continuation drops its owner.
    fn release(&mut self, x: u16, y: u16) {
        let Some(index) = self.index(x, y) else {
            return;
        };
        match std::mem::take(&mut self.slots[index]) {
            Slot::Glyph(cell) => {
                if cell.width == 2
                    && let Some(next) = self.index(x + 1, y)
                    && self.slots[next] == Slot::Continuation
                {
                    self.slots[next] = Slot::Empty;
                }
            }
            Slot::Continuation => {
                if let Some(owner) = x.checked_sub(1).and_then(|ox| self.index(ox, y))
                    && matches!(&self.slots[owner], Slot::Glyph(c) if c.width == 2)
                {
                    self.slots[owner] = Slot::Empty;
                }
            }
            Slot::Empty => {}
        }
    }

    /// The visible text of one row, blanks for empty slots, trailing blanks
    /// trimmed. Continuation columns contribute nothing.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        let mut out = String::new();
        for x in 0..self.width {
            match self.slot(x, y) {
                Slot::Empty => out.push(' '),
                Slot::Glyph(cell) => cell.write_chars(&mut out),
                Slot::Continuation => {}
            }
        }
        out.truncate(out.trim_end_matches(' ').len());
        out
    }
}
