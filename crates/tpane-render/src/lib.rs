#![forbid(unsafe_code)]

//! Render kernel: cells, the shared grid, surfaces, and ANSI presentation.

pub mod ansi;
pub mod cell;
pub mod grid;
pub mod surface;
pub mod term;

pub use cell::Cell;
pub use grid::{Grid, Slot};
pub use surface::{MemorySurface, Surface};
pub use term::AnsiSurface;
