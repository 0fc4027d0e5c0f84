#![forbid(unsafe_code)]

//! Append-only scrollback viewport.
//!
//! A [`Viewport`] owns a growing list of logical lines, a row index wrapping
//! them at the pane width, and a scroll cursor with auto-follow. Every
//! method takes `&self` and is callable from any thread: producers append
//! while the render tick draws.
//!
//! # Scroll model
//!
//! The viewport is either *following* (pinned to the newest rows; appends
//! move the view) or *pinned* (holding a fixed row; appends leave the view
//! alone). Scrolling up pins; scrolling down at the bottom resumes
//! following. A resize keeps the current mode.
//!
//! # Rendering
//!
//! `render` captures a snapshot (two `Arc` clones plus scalars) under the
//! widget lock, then draws entirely from the snapshot. An append landing
//! mid-draw clones the index vectors copy-on-write and only dirties the
//! next frame; the frame being drawn stays consistent.

use std::sync::{Arc, Mutex};

use tpane_core::Rect;
use tpane_render::{Cell, Surface};
use tpane_text::{Clusters, RowRecord, push_rows, rebuild_rows, split_lines};

#[derive(Debug)]
struct ViewportState {
    lines: Arc<Vec<Arc<str>>>,
    rows: Arc<Vec<RowRecord>>,
    /// Index of the first visible row.
    cursor: usize,
    /// Whether the view follows appended rows.
    follow: bool,
    area: Rect,
    dirty: bool,
}

impl ViewportState {
    /// Chars per wrapped row at the current area.
    fn wrap_width(&self) -> usize {
        usize::from(self.area.width).max(1)
    }

    /// First visible row when pinned to the newest content.
    fn tail(&self) -> usize {
        self.rows.len().saturating_sub(usize::from(self.area.height))
    }
}

/// Scrollback pane over a shared surface.
#[derive(Debug)]
pub struct Viewport<S> {
    surface: Arc<S>,
    state: Mutex<ViewportState>,
}

struct Snapshot {
    lines: Arc<Vec<Arc<str>>>,
    rows: Arc<Vec<RowRecord>>,
    cursor: usize,
    area: Rect,
}

impl<S: Surface> Viewport<S> {
    /// Create an empty, following viewport over `area`.
    #[must_use]
    pub fn new(surface: Arc<S>, area: Rect) -> Self {
        Self {
            surface,
            state: Mutex::new(ViewportState {
                lines: Arc::new(Vec::new()),
                rows: Arc::new(Vec::new()),
                cursor: 0,
                follow: true,
                area,
                dirty: true,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ViewportState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Append text, splitting on `\r\n` and `\n`. When following, the view
    /// moves to the newest rows; when pinned, it stays put. Always dirties.
    pub fn append(&self, text: &str) {
        let mut state = self.lock();
        let width = state.wrap_width();
        for part in split_lines(text) {
            let line: Arc<str> = Arc::from(part);
            let index = state.lines.len();
            push_rows(Arc::make_mut(&mut state.rows), index, &line, width);
            Arc::make_mut(&mut state.lines).push(line);
        }
        if state.follow {
            state.cursor = state.tail();
        }
        state.dirty = true;
        tracing::trace!(
            lines = state.lines.len(),
            rows = state.rows.len(),
            "viewport append"
        );
    }

    /// Drop all content. The scroll mode survives a clear.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.lines = Arc::new(Vec::new());
        state.rows = Arc::new(Vec::new());
        state.cursor = 0;
        state.dirty = true;
    }

    /// Move and resize the pane, rewrapping every line at the new width.
    /// A following view snaps to the newest rows, a pinned view clamps its
    /// cursor into range.
    pub fn resize(&self, area: Rect) {
        let mut state = self.lock();
        state.area = area;
        let width = state.wrap_width();
        state.rows = Arc::new(rebuild_rows(&state.lines, width));
        state.cursor = if state.follow {
            state.tail()
        } else {
            state.cursor.min(state.tail())
        };
        state.dirty = true;
        tracing::debug!(?area, rows = state.rows.len(), "viewport resized");
    }

    /// Scroll one row toward older content. Pins the view; at the very top
    /// this does nothing.
    pub fn scroll_up(&self) {
        let mut state = self.lock();
        if state.cursor == 0 {
            return;
        }
        state.follow = false;
        state.cursor -= 1;
        state.dirty = true;
    }

    /// Scroll one row toward newer content. At the bottom this snaps to the
    /// newest rows and resumes following.
    pub fn scroll_down(&self) {
        let mut state = self.lock();
        if state.cursor >= state.tail() {
            state.cursor = state.tail();
            state.follow = true;
        } else {
            state.cursor += 1;
        }
        state.dirty = true;
    }

    /// Jump a page toward older content. Pins the view; at the very top
    /// this does nothing.
    pub fn page_up(&self) {
        let mut state = self.lock();
        if state.cursor == 0 {
            return;
        }
        let page = usize::from(state.area.height).max(1);
        state.follow = false;
        state.cursor = state.cursor.saturating_sub(page);
        state.dirty = true;
    }

    /// Jump a page toward newer content, with the same bottom behavior as
    /// [`scroll_down`](Self::scroll_down).
    pub fn page_down(&self) {
        let mut state = self.lock();
        let tail = state.tail();
        if state.cursor >= tail {
            state.cursor = tail;
            state.follow = true;
        } else {
            let page = usize::from(state.area.height).max(1);
            state.cursor = (state.cursor + page).min(tail);
        }
        state.dirty = true;
    }

    /// Jump to the oldest row and pin.
    pub fn scroll_to_top(&self) {
        let mut state = self.lock();
        state.follow = false;
        state.cursor = 0;
        state.dirty = true;
    }

    /// Jump to the newest rows and resume following.
    pub fn scroll_to_bottom(&self) {
        let mut state = self.lock();
        state.follow = true;
        state.cursor = state.tail();
        state.dirty = true;
    }

    /// Number of logical lines stored.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lock().lines.len()
    }

    /// Number of wrapped rows indexed.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.lock().rows.len()
    }

    /// Index of the first visible row.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.lock().cursor
    }

    /// Whether the view follows appends.
    #[must_use]
    pub fn is_following(&self) -> bool {
        self.lock().follow
    }

    /// The pane's current area.
    #[must_use]
    pub fn area(&self) -> Rect {
        self.lock().area
    }

    /// Draw the visible rows if anything changed since the last render.
    /// Returns whether it drew. A zero-sized area draws nothing.
    pub fn render(&self) -> bool {
        let snapshot = {
            let mut state = self.lock();
            if !state.dirty {
                return false;
            }
            state.dirty = false;
            Snapshot {
                lines: Arc::clone(&state.lines),
                rows: Arc::clone(&state.rows),
                cursor: state.cursor,
                area: state.area,
            }
        };
        if snapshot.area.is_empty() {
            return false;
        }
        self.draw(&snapshot);
        true
    }

    fn draw(&self, snapshot: &Snapshot) {
        let area = snapshot.area;
        for y in 0..area.height {
            for x in 0..area.width {
                self.surface
                    .clear_cell(area.x.saturating_add(x), area.y.saturating_add(y));
            }
        }

        let visible = snapshot
            .rows
            .len()
            .saturating_sub(snapshot.cursor)
            .min(usize::from(area.height));
        for offset in 0..visible {
            let row = &snapshot.rows[snapshot.cursor + offset];
            let line = &snapshot.lines[row.line];
            let y = area.y.saturating_add(offset as u16);
            let mut col: u16 = 0;
            for cluster in Clusters::new(row.slice(line)) {
                let width = u16::from(cluster.width());
                if width > area.width - col {
                    break;
                }
                self.surface.put(
                    area.x.saturating_add(col),
                    y,
                    Cell::from_cluster(&cluster, false),
                );
                col += width;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tpane_render::MemorySurface;

    fn viewport(width: u16, height: u16) -> Viewport<MemorySurface> {
        let surface = Arc::new(MemorySurface::new(width, height));
        Viewport::new(surface, Rect::new(0, 0, width, height))
    }

    #[test]
    fn append_wraps_and_follows() {
        let vp = viewport(5, 2);
        vp.append("helloworldtest");
        assert_eq!(vp.line_count(), 1);
        assert_eq!(vp.row_count(), 3);
        // Following: first visible row is rows - height.
        assert_eq!(vp.cursor(), 1);
        assert!(vp.is_following());
    }

    #[test]
    fn append_empty_string_adds_one_empty_row() {
        let vp = viewport(10, 4);
        vp.append("");
        assert_eq!(vp.line_count(), 1);
        assert_eq!(vp.row_count(), 1);
    }

    #[test]
    fn separators_split_lines() {
        let vp = viewport(10, 4);
        vp.append("a\r\nb\nc");
        assert_eq!(vp.line_count(), 3);
        assert_eq!(vp.row_count(), 3);
    }

    #[test]
    fn scroll_up_pins_and_stops_at_top() {
        let vp = viewport(5, 2);
        vp.append("helloworldtest");
        vp.scroll_up();
        assert_eq!(vp.cursor(), 0);
        assert!(!vp.is_following());
        vp.scroll_up();
        assert_eq!(vp.cursor(), 0);
    }

    #[test]
    fn scroll_down_at_bottom_resumes_following() {
        let vp = viewport(5, 2);
        vp.append("helloworldtest");
        vp.scroll_up();
        assert!(!vp.is_following());
        vp.scroll_down();
        // Reached the tail, but still pinned.
        assert_eq!(vp.cursor(), 1);
        assert!(!vp.is_following());
        vp.scroll_down();
        // Scrolling down while at the tail snaps and resumes following.
        assert_eq!(vp.cursor(), 1);
        assert!(vp.is_following());
    }

    #[test]
    fn append_while_pinned_keeps_cursor() {
        let vp = viewport(10, 5);
        for i in 0..30 {
            vp.append(&format!("line {i}"));
        }
        assert_eq!(vp.cursor(), 25);
        vp.scroll_up();
        vp.scroll_up();
        vp.scroll_up();
        assert_eq!(vp.cursor(), 22);
        // A pinned view does not chase new content.
        vp.append("one more");
        assert_eq!(vp.cursor(), 22);
        assert!(!vp.is_following());
    }

    #[test]
    fn scroll_to_bottom_snaps_and_follows() {
        let vp = viewport(10, 3);
        for i in 0..10 {
            vp.append(&format!("line {i}"));
        }
        vp.scroll_to_top();
        vp.scroll_to_bottom();
        assert_eq!(vp.cursor(), 7);
        assert!(vp.is_following());
        vp.append("next");
        assert_eq!(vp.cursor(), 8);
    }

    #[test]
    fn page_jumps_are_height_sized() {
        let vp = viewport(10, 3);
        for i in 0..12 {
            vp.append(&format!("line {i}"));
        }
        assert_eq!(vp.cursor(), 9);
        vp.page_up();
        assert_eq!(vp.cursor(), 6);
        assert!(!vp.is_following());
        vp.page_up();
        vp.page_up();
        vp.page_up();
        assert_eq!(vp.cursor(), 0);
        vp.page_down();
        assert_eq!(vp.cursor(), 3);
        vp.page_down();
        vp.page_down();
        assert_eq!(vp.cursor(), 9);
        // At the tail now; one more resumes following.
        assert!(!vp.is_following());
        vp.page_down();
        assert!(vp.is_following());
    }

    #[test]
    fn clear_keeps_scroll_mode() {
        let vp = viewport(10, 2);
        for i in 0..8 {
            vp.append(&format!("line {i}"));
        }
        vp.scroll_to_top();
        vp.clear();
        assert_eq!(vp.row_count(), 0);
        assert_eq!(vp.cursor(), 0);
        assert!(!vp.is_following());

        vp.scroll_to_bottom();
        vp.clear();
        assert!(vp.is_following());
    }

    #[test]
    fn resize_rewraps_and_preserves_mode() {
        let vp = viewport(5, 2);
        vp.append("helloworldtest");
        assert_eq!(vp.row_count(), 3);
        vp.resize(Rect::new(0, 0, 7, 2));
        assert_eq!(vp.row_count(), 2);
        assert!(vp.is_following());
        assert_eq!(vp.cursor(), 0);

        vp.scroll_to_top();
        vp.resize(Rect::new(0, 0, 3, 2));
        assert!(!vp.is_following());
        assert_eq!(vp.cursor(), 0);
    }

    #[test]
    fn render_draws_visible_rows() {
        let surface = Arc::new(MemorySurface::new(5, 2));
        let vp = Viewport::new(Arc::clone(&surface), Rect::new(0, 0, 5, 2));
        vp.append("helloworldtest");
        assert!(vp.render());
        assert_eq!(surface.row_text(0), "world");
        assert_eq!(surface.row_text(1), "test");
    }

    #[test]
    fn render_is_idempotent_when_clean() {
        let surface = Arc::new(MemorySurface::new(5, 2));
        let vp = Viewport::new(Arc::clone(&surface), Rect::new(0, 0, 5, 2));
        vp.append("hi");
        assert!(vp.render());
        let puts = surface.put_count();
        assert!(!vp.render());
        assert_eq!(surface.put_count(), puts);
    }

    #[test]
    fn zero_area_skips_drawing() {
        let surface = Arc::new(MemorySurface::new(5, 2));
        let vp = Viewport::new(Arc::clone(&surface), Rect::new(0, 0, 0, 2));
        vp.append("hello");
        assert!(!vp.render());
        assert_eq!(surface.put_count(), 0);
    }

    #[test]
    fn wide_rows_truncate_at_right_edge() {
        // 3 wide chars per row by char count, but only 4 cells fit.
        let surface = Arc::new(MemorySurface::new(5, 1));
        let vp = Viewport::new(Arc::clone(&surface), Rect::new(0, 0, 5, 1));
        vp.append("日本語");
        assert!(vp.render());
        assert_eq!(surface.row_text(0), "日本");
    }

    #[test]
    fn cursor_stays_in_range_after_mixed_ops() {
        let vp = viewport(4, 3);
        for i in 0..20 {
            vp.append(&format!("{i}"));
            if i % 3 == 0 {
                vp.scroll_up();
            }
            if i % 7 == 0 {
                vp.scroll_down();
            }
            let max = vp.row_count().saturating_sub(3);
            assert!(vp.cursor() <= max, "cursor out of range");
        }
    }
}
