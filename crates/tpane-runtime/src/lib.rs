//! Screen orchestration and run loops.
//!
//! [`Screen`] arranges a scrolling log, a key reference, and an input line
//! on one shared surface and routes events between them. [`run`] drives a
//! screen with a background render ticker plus a blocking input loop until
//! the user quits.

#![forbid(unsafe_code)]

pub mod runtime;
pub mod screen;
pub mod stop;

pub use runtime::{run, RuntimeConfig};
pub use screen::{Dispatch, Screen, HELP_WIDTH, INPUT_HEIGHT};
pub use stop::{StopSignal, StopTrigger};
