#![forbid(unsafe_code)]

//! Text handling: glyph cluster segmentation and fixed-width row wrapping.
//!
//! [`cluster`] groups raw text into displayable glyph clusters (base
//! character plus combining marks and ZWJ joins) with cell widths. [`wrap`]
//! splits appended text into logical lines and cuts lines into fixed-width
//! display rows indexed by [`RowRecord`]s.
//!
//! # Example
//! ```
//! use tpane_text::{display_width, split_lines, rebuild_rows};
//!
//! assert_eq!(split_lines("one\r\ntwo"), ["one", "two"]);
//! assert_eq!(display_width("日本"), 4);
//!
//! let rows = rebuild_rows(&["helloworldtest"], 5);
//! assert_eq!(rows.len(), 3);
//! ```

pub mod cluster;
pub mod wrap;

pub use cluster::{Cluster, Clusters, ZWJ, char_width, display_width};
pub use wrap::{RowRecord, push_rows, rebuild_rows, row_count, split_lines};
