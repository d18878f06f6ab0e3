#![forbid(unsafe_code)]

//! Logging support.
//!
//! Re-exports `tracing::trace` when the `tracing` feature is enabled.
//! Without the feature the same name expands to nothing, so call sites never
//! need their own `cfg` gates.

#[cfg(feature = "tracing")]
pub use tracing::trace;

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
}
