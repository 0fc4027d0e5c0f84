#![forbid(unsafe_code)]

//! Widgets for tpane.
//!
//! [`Viewport`] is an append-only scrollback pane with wrapping and
//! auto-follow; [`InputLine`] is a titled single-line input editing at the
//! end of its content. Both draw through a shared
//! [`Surface`](tpane_render::Surface) handle and keep state behind a mutex
//! so mutators and the render tick can run on different threads.

pub mod input_line;
pub mod viewport;

pub use input_line::InputLine;
pub use viewport::Viewport;
