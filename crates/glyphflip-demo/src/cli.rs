#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via the `GLYPHFLIP_*` prefix.

use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::process;

use glyphflip::{ScrambleConfig, ScrambleOptions};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Text shown when none is given.
pub const DEFAULT_TEXT: &str = "GLYPHFLIP";

/// Tick interval the demo boots with unless told otherwise.
pub const BOOT_TICK_MS: u64 = 26;

const HELP_TEXT: &str = "\
glyphflip demo: hover a letter to scramble it

USAGE:
    glyphflip-demo [OPTIONS]

OPTIONS:
    --text=TEXT          Text to display (default: GLYPHFLIP)
    --duration-ms=N      Scramble window in milliseconds (default: 420)
    --tick-ms=N          Interval between glyph changes (default: 26)
    --restore-on-leave   Restore a letter as soon as the pointer leaves it
    --config=PATH        JSON options file ({\"durationMs\", \"tickMs\", \"restoreOnLeave\"})
    --exit-after-ms=N    Quit after N milliseconds (0 = never)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    q / Esc / Ctrl+C     Quit

ENVIRONMENT VARIABLES:
    GLYPHFLIP_TEXT              Override --text
    GLYPHFLIP_DURATION_MS       Override --duration-ms
    GLYPHFLIP_TICK_MS           Override --tick-ms
    GLYPHFLIP_RESTORE_ON_LEAVE  Set to 1 or true to enable --restore-on-leave
    GLYPHFLIP_CONFIG            Override --config
    GLYPHFLIP_EXIT_AFTER_MS     Override --exit-after-ms
    GLYPHFLIP_LOG               Write logs to this file
    GLYPHFLIP_LOG_FILTER        Log filter directives (default: debug for glyphflip crates)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// Text to scramble.
    pub text: String,
    /// JSON options file, applied before env and flag overrides.
    pub config_path: Option<PathBuf>,
    /// Scramble window override.
    pub duration_ms: Option<u64>,
    /// Tick interval override.
    pub tick_ms: Option<u64>,
    /// Restore-on-leave override.
    pub restore_on_leave: Option<bool>,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.into(),
            config_path: None,
            duration_ms: None,
            tick_ms: None,
            restore_on_leave: None,
            exit_after_ms: 0,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the demo.
    Run(Opts),
    /// Print help and exit.
    Help,
    /// Print the version and exit.
    Version,
}

/// A flag or environment value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// A numeric option did not parse.
    InvalidNumber { option: &'static str, value: String },
    /// A boolean environment value was not recognised.
    InvalidBool { option: &'static str, value: String },
    /// An argument nobody understands.
    UnknownArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber { option, value } => write!(f, "Invalid {option} value: {value}"),
            Self::InvalidBool { option, value } => write!(f, "Invalid {option} value: {value}"),
            Self::UnknownArgument(arg) => write!(f, "Unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl Opts {
    /// Parse the process arguments and environment, exiting on `--help`,
    /// `--version`, or a bad argument.
    pub fn parse() -> Self {
        match Self::parse_from(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("glyphflip-demo {VERSION}");
                process::exit(0);
            }
            Err(err) => {
                eprintln!("{err}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` with environment lookups through `var`.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse_from<I, F>(args: I, var: F) -> Result<Command, CliError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        if let Some(val) = var("GLYPHFLIP_TEXT") {
            opts.text = val;
        }
        if let Some(val) = var("GLYPHFLIP_CONFIG") {
            opts.config_path = Some(PathBuf::from(val));
        }
        if let Some(val) = var("GLYPHFLIP_DURATION_MS") {
            opts.duration_ms = Some(parse_number("GLYPHFLIP_DURATION_MS", &val)?);
        }
        if let Some(val) = var("GLYPHFLIP_TICK_MS") {
            opts.tick_ms = Some(parse_number("GLYPHFLIP_TICK_MS", &val)?);
        }
        if let Some(val) = var("GLYPHFLIP_RESTORE_ON_LEAVE") {
            opts.restore_on_leave = Some(parse_bool("GLYPHFLIP_RESTORE_ON_LEAVE", &val)?);
        }
        if let Some(val) = var("GLYPHFLIP_EXIT_AFTER_MS") {
            opts.exit_after_ms = parse_number("GLYPHFLIP_EXIT_AFTER_MS", &val)?;
        }

        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                "--restore-on-leave" => opts.restore_on_leave = Some(true),
                other => {
                    if let Some(val) = other.strip_prefix("--text=") {
                        opts.text = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--config=") {
                        opts.config_path = Some(PathBuf::from(val));
                    } else if let Some(val) = other.strip_prefix("--duration-ms=") {
                        opts.duration_ms = Some(parse_number("--duration-ms", val)?);
                    } else if let Some(val) = other.strip_prefix("--tick-ms=") {
                        opts.tick_ms = Some(parse_number("--tick-ms", val)?);
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = parse_number("--exit-after-ms", val)?;
                    } else {
                        return Err(CliError::UnknownArgument(other.to_string()));
                    }
                }
            }
        }

        Ok(Command::Run(opts))
    }

    /// Resolve the scramble options: boot defaults, then the JSON file, then
    /// env/flag overrides.
    pub fn scramble_config(&self) -> glyphflip::Result<ScrambleConfig> {
        let mut config = ScrambleConfig::default().with_tick_ms(BOOT_TICK_MS);
        if let Some(path) = &self.config_path {
            config = ScrambleOptions::from_json(&fs::read_to_string(path)?)?.apply_to(config);
        }
        if let Some(ms) = self.duration_ms {
            config.duration_ms = ms;
        }
        if let Some(ms) = self.tick_ms {
            config.tick_ms = ms;
        }
        if let Some(enabled) = self.restore_on_leave {
            config.restore_on_leave = enabled;
        }
        config.validate()?;
        Ok(config)
    }
}

fn parse_number(option: &'static str, value: &str) -> Result<u64, CliError> {
    value.trim().parse().map_err(|_| CliError::InvalidNumber {
        option,
        value: value.to_string(),
    })
}

fn parse_bool(option: &'static str, value: &str) -> Result<bool, CliError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(CliError::InvalidBool {
            option,
            value: value.to_string(),
        }),
    }
}
