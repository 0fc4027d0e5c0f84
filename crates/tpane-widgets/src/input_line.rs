#![forbid(unsafe_code)]

//! Single-line input widget.
//!
//! Two rows: a decorated title row (the title centered in `[ ... ]`
//! brackets, dash-padded to the full width, drawn bold) and a content row
//! showing the tail of the typed value with the terminal cursor parked one
//! column past the last character. The logical cursor is always at the end;
//! there is no mid-line editing.
//!
//! Like the viewport, all state sits behind one mutex and every method
//! takes `&self`.

use std::sync::{Arc, Mutex};

use tpane_core::Rect;
use tpane_render::{Cell, Surface};
use tpane_text::{Cluster, Clusters};

/// Cells reserved around the title before it is truncated: bracket
/// decoration plus breathing room on both sides.
const TITLE_RESERVE: usize = 20;

#[derive(Debug)]
struct InputState {
    area: Rect,
    title: String,
    value: String,
    dirty: bool,
}

/// Titled one-line text input over a shared surface.
#[derive(Debug)]
pub struct InputLine<S> {
    surface: Arc<S>,
    state: Mutex<InputState>,
}

impl<S: Surface> InputLine<S> {
    /// Create an empty input over `area` (two rows tall by convention).
    #[must_use]
    pub fn new(surface: Arc<S>, area: Rect, title: impl Into<String>) -> Self {
        Self {
            surface,
            state: Mutex::new(InputState {
                area,
                title: title.into(),
                value: String::new(),
                dirty: true,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InputState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace the title.
    pub fn set_title(&self, title: impl Into<String>) {
        let mut state = self.lock();
        state.title = title.into();
        state.dirty = true;
    }

    /// Replace the value.
    pub fn set_value(&self, value: impl Into<String>) {
        let mut state = self.lock();
        state.value = value.into();
        state.dirty = true;
    }

    /// Append one character at the end.
    pub fn insert_char(&self, c: char) {
        let mut state = self.lock();
        state.value.push(c);
        state.dirty = true;
    }

    /// Delete the last character, if any.
    pub fn backspace(&self) {
        let mut state = self.lock();
        if state.value.pop().is_some() {
            state.dirty = true;
        }
    }

    /// The current value.
    #[must_use]
    pub fn value(&self) -> String {
        self.lock().value.clone()
    }

    /// Take the value, leaving the input empty.
    pub fn commit(&self) -> String {
        let mut state = self.lock();
        state.dirty = true;
        std::mem::take(&mut state.value)
    }

    /// Move and resize the widget.
    pub fn resize(&self, area: Rect) {
        let mut state = self.lock();
        state.area = area;
        state.dirty = true;
    }

    /// The widget's current area.
    #[must_use]
    pub fn area(&self) -> Rect {
        self.lock().area
    }

    /// Draw both rows if anything changed since the last render. Returns
    /// whether it drew. A zero-sized area draws nothing.
    pub fn render(&self) -> bool {
        let (area, title, value) = {
            let mut state = self.lock();
            if !state.dirty {
                return false;
            }
            state.dirty = false;
            (state.area, state.title.clone(), state.value.clone())
        };
        if area.is_empty() {
            return false;
        }

        for y in 0..area.height {
            for x in 0..area.width {
                self.surface
                    .clear_cell(area.x.saturating_add(x), area.y.saturating_add(y));
            }
        }

        self.draw_row(&decorate_title(&title, area.width), area, 0, true);

        if area.height >= 2 {
            let budget = usize::from(area.width).saturating_sub(1);
            let (tail, cells) = value_tail(&value, budget);
            self.draw_row(&tail, area, 1, false);
            self.surface.set_cursor(Some((
                area.x.saturating_add(cells as u16),
                area.y.saturating_add(1),
            )));
        }
        true
    }

    /// Draw one row of text inside the area, truncating at the right edge.
    fn draw_row(&self, text: &str, area: Rect, row: u16, bold: bool) {
        let y = area.y.saturating_add(row);
        let mut col: u16 = 0;
        for cluster in Clusters::new(text) {
            let width = u16::from(cluster.width());
            if width > area.width - col {
                break;
            }
            self.surface.put(
                area.x.saturating_add(col),
                y,
                Cell::from_cluster(&cluster, bold),
            );
            col += width;
        }
    }
}

/// Bracket the title, truncate it to the width budget, and center it in a
/// full-width dash rule.
fn decorate_title(title: &str, width: u16) -> String {
    let budget = usize::from(width).saturating_sub(TITLE_RESERVE);
    let mut kept = String::new();
    let mut cells = 0;
    let mut truncated = false;
    for cluster in Clusters::new(title) {
        let cluster_width = usize::from(cluster.width());
        if cells + cluster_width > budget {
            truncated = true;
            break;
        }
        kept.extend(cluster.chars().iter());
        cells += cluster_width;
    }
    if truncated {
        kept.push_str("...");
        cells += 3;
    }

    // "[ " and " ]" around the kept title.
    let decorated = cells + 4;
    let pad = usize::from(width).saturating_sub(decorated);
    let left = pad / 2;
    let right = pad - left;
    format!("{}[ {} ]{}", "-".repeat(left), kept, "-".repeat(right))
}

/// The longest tail of `value` fitting `budget` cells. Returns the tail
/// text and its width in cells.
fn value_tail(value: &str, budget: usize) -> (String, usize) {
    let clusters: Vec<Cluster> = Clusters::new(value).collect();
    let mut cells = 0;
    let mut start = clusters.len();
    while start > 0 {
        let cluster_width = usize::from(clusters[start - 1].width());
        if cells + cluster_width > budget {
            break;
        }
        cells += cluster_width;
        start -= 1;
    }
    let mut text = String::new();
    for cluster in &clusters[start..] {
        text.extend(cluster.chars().iter());
    }
    (text, cells)
}
