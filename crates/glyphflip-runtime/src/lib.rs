#![forbid(unsafe_code)]

//! glyphflip runtime
//!
//! Scramble-on-hover for a row of characters: each character cell flips
//! through random glyphs for a fixed window after the pointer enters it,
//! then settles back to its original glyph.
//!
//! # Key Components
//!
//! - [`ScrambleController`] - per-cell `Idle`/`Scrambling` state machine
//! - [`ScrambleSurface`] - the container of cells produced by segmentation
//! - [`ScrambleRuntime`] - surface + timer queue + random source, for hosts
//! - [`attach`] - initialization entry point against a [`Host`]
//! - [`Simulator`] - deterministic simulated-time harness
//! - [`ScrambleConfig`] - timing options

pub mod config;
pub mod controller;
pub mod driver;
pub mod host;
pub mod simulator;
pub mod surface;

pub use config::{ConfigError, ScrambleConfig, ScrambleOptions};
pub use controller::{ScrambleController, ScrambleState, TickOutcome};
pub use driver::{ScrambleRuntime, TickRecord};
pub use host::{Element, ElementRegistry, Host, attach};
pub use simulator::Simulator;
pub use surface::ScrambleSurface;
