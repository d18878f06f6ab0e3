#![forbid(unsafe_code)]

//! Text segmentation into character cells, the scramble alphabet, and
//! column hit-testing.
//!
//! # Example
//! ```
//! use glyphflip_text::{segment, cell_at_column};
//! use glyphflip_core::event::CellId;
//!
//! let cells = segment("AB C");
//! assert_eq!(cells.len(), 4);
//! assert!(cells[2].is_blank());
//! assert_eq!(cell_at_column(&cells, 10, 13), Some(CellId(3)));
//! ```

pub mod alphabet;
pub mod hit;
pub mod segment;

pub use alphabet::{Alphabet, pick_random};
pub use hit::{cell_at_column, strip_width};
pub use segment::{CellSink, CharCell, is_blank, segment, segment_into};
