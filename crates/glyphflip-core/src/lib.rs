#![forbid(unsafe_code)]

//! Core: cell identifiers, pointer events, hover tracking, clocks and timers.

pub mod clock;
pub mod event;
pub mod hover;
pub mod logging;
pub mod scheduler;

// Re-export the trace macro at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::trace;
