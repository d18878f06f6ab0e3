#![forbid(unsafe_code)]

//! Scramble timing configuration.
//!
//! Option names on the wire are camelCase (`durationMs`, `tickMs`,
//! `restoreOnLeave`). An option that is missing or `null` takes its default,
//! and unrecognised keys are ignored.
//!
//! ```
//! use glyphflip_runtime::config::ScrambleConfig;
//!
//! let config = ScrambleConfig::from_json(r#"{ "tickMs": 26 }"#).unwrap();
//! assert_eq!(config.duration_ms, 420);
//! assert_eq!(config.tick_ms, 26);
//! assert!(!config.restore_on_leave);
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default total scramble window.
pub const DEFAULT_DURATION_MS: u64 = 420;

/// Default interval between glyph changes.
pub const DEFAULT_TICK_MS: u64 = 28;

/// Timing and pointer-leave behaviour shared by every cell of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ScrambleOptions")]
pub struct ScrambleConfig {
    /// Total scramble window, measured from the latest trigger.
    pub duration_ms: u64,
    /// Interval between glyph changes.
    pub tick_ms: u64,
    /// Cancel and restore immediately when the pointer leaves a cell.
    /// Off by default: a started scramble runs to completion.
    pub restore_on_leave: bool,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            tick_ms: DEFAULT_TICK_MS,
            restore_on_leave: false,
        }
    }
}

/// A partial options object, as a host supplies it.
///
/// Each field is `None` when the key is absent or `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrambleOptions {
    /// `durationMs`.
    pub duration_ms: Option<u64>,
    /// `tickMs`.
    pub tick_ms: Option<u64>,
    /// `restoreOnLeave`.
    pub restore_on_leave: Option<bool>,
}

impl ScrambleOptions {
    /// Parse a JSON options object without validating it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Overlay the options that are set onto `base`.
    #[must_use]
    pub fn apply_to(self, base: ScrambleConfig) -> ScrambleConfig {
        ScrambleConfig {
            duration_ms: self.duration_ms.unwrap_or(base.duration_ms),
            tick_ms: self.tick_ms.unwrap_or(base.tick_ms),
            restore_on_leave: self.restore_on_leave.unwrap_or(base.restore_on_leave),
        }
    }
}

impl From<ScrambleOptions> for ScrambleConfig {
    fn from(options: ScrambleOptions) -> Self {
        options.apply_to(Self::default())
    }
}

impl ScrambleConfig {
    /// Parse a JSON options object over the defaults and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::default().overlay_json(json)
    }

    /// Parse a JSON options object over `self` and validate the result.
    ///
    /// Options the object leaves out keep their value from `self`.
    pub fn overlay_json(self, json: &str) -> Result<Self, ConfigError> {
        let config = ScrambleOptions::from_json(json)?.apply_to(self);
        config.validate()?;
        Ok(config)
    }

    /// Set the scramble window (builder).
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Set the tick interval (builder).
    #[must_use]
    pub fn with_tick_ms(mut self, tick_ms: u64) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    /// Enable or disable restore-on-leave (builder).
    #[must_use]
    pub fn with_restore_on_leave(mut self, enabled: bool) -> Self {
        self.restore_on_leave = enabled;
        self
    }

    /// Reject settings the scheduler cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        Ok(())
    }

    /// Scramble window as a [`Duration`].
    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Tick interval as a [`Duration`], never shorter than 1ms.
    #[inline]
    #[must_use]
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

/// Why a configuration was rejected.
#[derive(Debug)]
pub enum ConfigError {
    /// The options object was not valid JSON or had mistyped fields.
    Json(serde_json::Error),
    /// `tickMs` was zero.
    ZeroTick,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid scramble options: {err}"),
            Self::ZeroTick => write!(f, "tickMs must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::ZeroTick => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
