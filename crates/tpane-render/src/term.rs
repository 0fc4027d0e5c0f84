#![forbid(unsafe_code)]

//! ANSI-emitting terminal surface.
//!
//! [`AnsiSurface`] keeps two grids: the one widgets draw into and the one
//! the terminal is currently showing. `present` diffs them row by row and
//! emits one cursor-position sequence per run of changed cells, toggling
//! bold only when it changes, then flushes the writer once. A resize (or
//! the first present) repaints from scratch after erasing the display.
//!
//! The whole surface sits behind one mutex. Cell writes hold it per call;
//! `present` holds it for the whole diff and emit, so a write landing
//! mid-present waits for that frame to finish.

use std::io::{self, BufWriter, Stdout, Write};
use std::sync::Mutex;

use crate::ansi;
use crate::cell::Cell;
use crate::grid::{Grid, Slot};
use crate::surface::Surface;

/// Buffered writer capacity for terminal output.
const WRITER_CAPACITY: usize = 64 * 1024;

#[derive(Debug)]
struct AnsiInner<W> {
    writer: W,
    /// What widgets have drawn.
    grid: Grid,
    /// What the terminal is showing.
    shown: Grid,
    cursor: Option<(u16, u16)>,
    /// Cursor state last sent to the terminal.
    shown_cursor: Option<(u16, u16)>,
    /// Terminal SGR bold state.
    bold: bool,
    /// Repaint everything on the next present.
    full_redraw: bool,
}

/// Terminal surface writing ANSI sequences to `W`.
#[derive(Debug)]
pub struct AnsiSurface<W: Write + Send> {
    inner: Mutex<AnsiInner<W>>,
}

impl AnsiSurface<BufWriter<Stdout>> {
    /// Surface over buffered stdout.
    #[must_use]
    pub fn stdout(width: u16, height: u16) -> Self {
        Self::new(
            BufWriter::with_capacity(WRITER_CAPACITY, io::stdout()),
            width,
            height,
        )
    }
}

impl<W: Write + Send> AnsiSurface<W> {
    /// Surface over an arbitrary writer.
    #[must_use]
    pub fn new(writer: W, width: u16, height: u16) -> Self {
        Self {
            inner: Mutex::new(AnsiInner {
                writer,
                grid: Grid::new(width, height),
                shown: Grid::new(width, height),
                cursor: None,
                shown_cursor: None,
                bold: false,
                full_redraw: true,
            }),
        }
    }

    /// Tear down the surface and recover the writer.
    pub fn into_writer(self) -> W {
        self.inner.into_inner().unwrap_or_else(|e| e.into_inner()).writer
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AnsiInner<W>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W> AnsiInner<W>
where
    W: Write,
{
    fn emit_frame(&mut self) -> io::Result<()> {
        let mut wrote = false;

        if self.full_redraw {
            self.writer.write_all(ansi::CURSOR_HIDE)?;
            self.writer.write_all(ansi::CLEAR_ALL)?;
            self.writer.write_all(ansi::SGR_RESET)?;
            self.bold = false;
            self.shown.clear();
            self.full_redraw = false;
            wrote = true;
        }

        for y in 0..self.grid.height() {
            let mut x = 0;
            while x < self.grid.width() {
                if self.grid.slot(x, y) == self.shown.slot(x, y) {
                    x += 1;
                    continue;
                }
                // A run never starts on a continuation; back up to its owner.
                let start = if matches!(self.grid.slot(x, y), Slot::Continuation) {
                    x.saturating_sub(1)
                } else {
                    x
                };
                if !wrote {
                    self.writer.write_all(ansi::CURSOR_HIDE)?;
                    wrote = true;
                }
                let end = self.emit_run(start, y)?;
                x = end.max(x + 1);
            }
        }

        if wrote {
            self.shown = self.grid.clone();
        }

        if wrote || self.cursor != self.shown_cursor {
            match self.cursor {
                Some((x, y)) => {
                    ansi::cup(&mut self.writer, y, x)?;
                    self.writer.write_all(ansi::CURSOR_SHOW)?;
                }
                None => {
                    self.writer.write_all(ansi::CURSOR_HIDE)?;
                }
            }
            self.shown_cursor = self.cursor;
        }

        self.writer.flush()
    }

    /// Emit cells from `start` while they differ from the shown grid.
    /// Returns the column after the run.
    fn emit_run(&mut self, start: u16, y: u16) -> io::Result<u16> {
        ansi::cup(&mut self.writer, y, start)?;
        let mut text = String::new();
        let mut x = start;
        while x < self.grid.width() && self.grid.slot(x, y) != self.shown.slot(x, y) {
            match self.grid.slot(x, y) {
                Slot::Empty => {
                    text.push(' ');
                    x += 1;
                }
                Slot::Glyph(cell) => {
                    if cell.bold != self.bold {
                        self.writer.write_all(text.as_bytes())?;
                        text.clear();
                        ansi::sgr_bold(&mut self.writer, cell.bold)?;
                        self.bold = cell.bold;
                    }
                    cell.write_chars(&mut text);
                    x += u16::from(cell.width);
                }
                Slot::Continuation => {
                    // Owner already advanced past this column.
                    x += 1;
                }
            }
        }
        self.writer.write_all(text.as_bytes())?;
        Ok(x)
    }
}

impl<W: Write + Send> Surface for AnsiSurface<W> {
    fn size(&self) -> (u16, u16) {
        let inner = self.lock();
        (inner.grid.width(), inner.grid.height())
    }

    fn resize(&self, width: u16, height: u16) {
        let mut inner = self.lock();
        inner.grid.resize(width, height);
        inner.shown.resize(width, height);
        inner.full_redraw = true;
        tracing::debug!(width, height, "surface resized");
    }

    fn put(&self, x: u16, y: u16, cell: Cell) {
        self.lock().grid.put(x, y, cell);
    }

    fn clear_cell(&self, x: u16, y: u16) {
        self.lock().grid.clear_cell(x, y);
    }

    fn set_cursor(&self, position: Option<(u16, u16)>) {
        self.lock().cursor = position;
    }

    fn present(&self) -> io::Result<()> {
        self.lock().emit_frame()
    }
}
