#![forbid(unsafe_code)]

//! glyphflip public facade crate.
//!
//! Re-exports the types a host needs to scramble a name on hover, plus a
//! small prelude and the top-level error type.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use glyphflip_core::clock::{Clock, ManualClock, MonotonicClock};
pub use glyphflip_core::event::{CellId, PointerEvent};
pub use glyphflip_core::hover::{HoverTracker, HoverTransition};
pub use glyphflip_core::scheduler::{Fired, Scheduler, TimerHandle, TimerQueue};

// --- Text re-exports -------------------------------------------------------

pub use glyphflip_text::{Alphabet, CellSink, CharCell, cell_at_column, pick_random, segment};

// --- Runtime re-exports ----------------------------------------------------

pub use glyphflip_runtime::{
    ConfigError, Element, ElementRegistry, Host, ScrambleConfig, ScrambleController,
    ScrambleOptions, ScrambleRuntime, ScrambleState, ScrambleSurface, Simulator, TickOutcome,
    attach,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for glyphflip hosts.
#[derive(Debug)]
pub enum Error {
    /// I/O failure while reading options or driving the host.
    Io(std::io::Error),
    /// Rejected scramble options.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for glyphflip APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CellId, Clock, Error, HoverTracker, MonotonicClock, PointerEvent, Result, ScrambleConfig,
        ScrambleRuntime, ScrambleState, ScrambleSurface, attach,
    };

    pub use crate::{core, runtime, text};
}

pub use glyphflip_core as core;
pub use glyphflip_runtime as runtime;
pub use glyphflip_text as text;
