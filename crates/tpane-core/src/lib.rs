#![forbid(unsafe_code)]

//! Core: geometry, canonical input events, and terminal session lifecycle.

pub mod event;
pub mod geometry;
pub mod session;

pub use event::{Event, KeyCode, KeyEvent, Modifiers, MouseEvent, MouseEventKind};
pub use geometry::Rect;
pub use session::{SessionOptions, TerminalSession};
