//! Three-pane screen: scrolling log, key reference, single-line input.
//!
//! [`Screen`] owns the widgets and the layout math, routes canonical events
//! to them, and forwards committed input over an mpsc channel so producers
//! never hold a callback into application code.

#![forbid(unsafe_code)]

use std::io;
use std::sync::mpsc;
use std::sync::Arc;

use tpane_core::event::{Event, KeyCode, MouseEventKind};
use tpane_core::geometry::Rect;
use tpane_render::Surface;
use tpane_widgets::{InputLine, Viewport};

/// Width in columns of the key-reference pane on the right edge.
pub const HELP_WIDTH: u16 = 26;

/// Height in rows of the input line at the bottom edge.
pub const INPUT_HEIGHT: u16 = 2;

/// What the caller should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Keep running.
    Continue,
    /// Tear down the loops and exit.
    Quit,
}

/// Pane rectangles for a given terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    log: Rect,
    help: Rect,
    input: Rect,
}

/// Splits the terminal into log, help, and input panes.
///
/// The input line takes the bottom two rows, the help pane the rightmost
/// [`HELP_WIDTH`] columns of the remainder, the log everything else.
/// Undersized terminals saturate: panes shrink to zero rather than overlap
/// out of bounds, and zero-area panes skip drawing entirely.
fn layout(width: u16, height: u16) -> Layout {
    let body = height.saturating_sub(INPUT_HEIGHT);
    let log_width = width.saturating_sub(HELP_WIDTH);
    Layout {
        log: Rect::new(0, 0, log_width, body),
        help: Rect::new(log_width, 0, width - log_width, body),
        input: Rect::new(0, body, width, height - body),
    }
}

/// The orchestrator for the standard three-pane terminal screen.
///
/// All methods take `&self`; the widgets synchronize internally, so one
/// `Screen` can be shared between producer threads, the render ticker, and
/// the input loop.
pub struct Screen<S> {
    surface: Arc<S>,
    log: Viewport<S>,
    help: Viewport<S>,
    input: InputLine<S>,
    commits: mpsc::Sender<String>,
}

impl<S: Surface> Screen<S> {
    /// Builds the screen for a terminal of `width` x `height` cells.
    ///
    /// Returns the screen plus the receiving end of the commit channel;
    /// every line entered in the input pane arrives there.
    pub fn new(surface: Arc<S>, width: u16, height: u16) -> (Self, mpsc::Receiver<String>) {
        let panes = layout(width, height);
        let log = Viewport::new(Arc::clone(&surface), panes.log);
        let help = Viewport::new(Arc::clone(&surface), panes.help);
        let input = InputLine::new(Arc::clone(&surface), panes.input, "");
        let (commits, commit_rx) = mpsc::channel();

        let screen = Self {
            surface,
            log,
            help,
            input,
            commits,
        };
        screen.fill_key_reference();
        (screen, commit_rx)
    }

    fn fill_key_reference(&self) {
        self.help.append("Keyboard shortcut");
        self.help.append("  Escape     : Quit");
        self.help.append("  Arrow Up   : Scroll Up");
        self.help.append("  Arrow Down : Scroll Down");
        self.help.append("  Arrow Left : First page");
        self.help.append("  Arrow Right: Last page");
        self.help.append("  Page Up    : Prev page");
        self.help.append("  Page Down  : Next page");
        self.help.append("  Home / End : Top/Bottom");
    }

    /// Appends a line to the log pane. Producer threads call this directly.
    pub fn log_line(&self, text: &str) {
        self.log.append(text);
    }

    /// Appends a line to the help pane, below the key reference.
    pub fn help_line(&self, text: &str) {
        self.help.append(text);
    }

    /// Sets the title shown in the input pane's top border.
    pub fn set_title(&self, title: &str) {
        self.input.set_title(title);
    }

    /// The log viewport.
    pub fn log(&self) -> &Viewport<S> {
        &self.log
    }

    /// The help viewport.
    pub fn help(&self) -> &Viewport<S> {
        &self.help
    }

    /// The input line.
    pub fn input(&self) -> &InputLine<S> {
        &self.input
    }

    /// Routes one canonical event to the widgets.
    ///
    /// Scrolling keys and the mouse wheel drive the log pane; editing keys
    /// drive the input line; Enter commits the input value onto the channel.
    /// Returns [`Dispatch::Quit`] on Escape, [`Dispatch::Continue`] for
    /// everything else.
    pub fn handle_event(&self, event: Event) -> Dispatch {
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Escape => return Dispatch::Quit,
                KeyCode::Up => self.log.scroll_up(),
                KeyCode::Down => self.log.scroll_down(),
                KeyCode::Left | KeyCode::Home => self.log.scroll_to_top(),
                KeyCode::Right | KeyCode::End => self.log.scroll_to_bottom(),
                KeyCode::PageUp => self.log.page_up(),
                KeyCode::PageDown => self.log.page_down(),
                KeyCode::Backspace => self.input.backspace(),
                KeyCode::Enter => {
                    let text = self.input.commit();
                    if self.commits.send(text).is_err() {
                        tracing::warn!("commit receiver dropped, input discarded");
                    }
                }
                KeyCode::Char(c) if !c.is_control() => self.input.insert_char(c),
                _ => {}
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => self.log.scroll_up(),
                MouseEventKind::ScrollDown => self.log.scroll_down(),
                _ => {}
            },
            Event::Resize { width, height } => self.resize(width, height),
        }
        Dispatch::Continue
    }

    /// Resizes the surface and relays out all three panes.
    ///
    /// The surface reset forces a full repaint on the next present, so no
    /// stale cells survive the geometry change.
    pub fn resize(&self, width: u16, height: u16) {
        tracing::debug!(width, height, "screen resize");
        self.surface.resize(width, height);
        let panes = layout(width, height);
        self.log.resize(panes.log);
        self.help.resize(panes.help);
        self.input.resize(panes.input);
    }

    /// Renders every dirty widget, then presents the surface once if any of
    /// them actually drew.
    ///
    /// Returns whether a present happened. A fully clean screen costs three
    /// dirty-flag checks and no terminal writes.
    pub fn render_all(&self) -> io::Result<bool> {
        let mut drew = self.log.render();
        drew |= self.help.render();
        drew |= self.input.render();
        if drew {
            self.surface.present()?;
        }
        Ok(drew)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_splits_into_three_panes() {
        let panes = layout(80, 24);
        assert_eq!(panes.log, Rect::new(0, 0, 54, 22));
        assert_eq!(panes.help, Rect::new(54, 0, 26, 22));
        assert_eq!(panes.input, Rect::new(0, 22, 80, 2));
    }

    #[test]
    fn undersized_terminal_saturates() {
        let panes = layout(20, 1);
        assert_eq!(panes.log, Rect::new(0, 0, 0, 0));
        assert_eq!(panes.help, Rect::new(0, 0, 20, 0));
        assert_eq!(panes.input, Rect::new(0, 0, 20, 1));
        assert!(panes.log.is_empty());
        assert!(panes.help.is_empty());
    }
}
