#![forbid(unsafe_code)]

//! Tpane public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports the common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.
//!
//! The short version: open a [`TerminalSession`], build an [`AnsiSurface`]
//! over stdout, hand both to a [`Screen`], and call [`run`]. Producer
//! threads append to the log with [`Screen::log_line`]; committed input
//! arrives on the channel returned by [`Screen::new`].

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use tpane_core::event::{
    Event, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
pub use tpane_core::geometry::Rect;
pub use tpane_core::session::{SessionOptions, TerminalSession};

// --- Text re-exports -------------------------------------------------------

pub use tpane_text::{Cluster, Clusters, RowRecord, char_width, display_width};

// --- Render re-exports -----------------------------------------------------

pub use tpane_render::{AnsiSurface, Cell, Grid, MemorySurface, Slot, Surface};

// --- Widget re-exports -----------------------------------------------------

pub use tpane_widgets::{InputLine, Viewport};

// --- Runtime re-exports ----------------------------------------------------

pub use tpane_runtime::{
    run, Dispatch, RuntimeConfig, Screen, StopSignal, StopTrigger, HELP_WIDTH,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for tpane apps.
#[derive(Debug)]
pub enum Error {
    /// I/O failure during terminal operations.
    Io(std::io::Error),
    /// Terminal or runtime error with message.
    Terminal(String),
}

impl Error {
    /// A terminal failure, with context prepended to the source error.
    #[must_use]
    pub fn terminal(context: &str, err: std::io::Error) -> Self {
        Self::Terminal(format!("{context}: {err}"))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Terminal(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for tpane APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AnsiSurface, Dispatch, Error, Event, KeyCode, KeyEvent, MemorySurface, Modifiers, Rect,
        Result, RuntimeConfig, Screen, SessionOptions, Surface, TerminalSession, run,
    };

    pub use crate::{core, render, runtime, text, widgets};
}

pub use tpane_core as core;
pub use tpane_render as render;
pub use tpane_runtime as runtime;
pub use tpane_text as text;
pub use tpane_widgets as widgets;
