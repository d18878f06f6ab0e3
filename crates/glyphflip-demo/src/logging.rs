#![forbid(unsafe_code)]

//! Log setup. The terminal is owned by the UI, so logs only ever go to a
//! file.

use std::env;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "glyphflip_demo=debug,glyphflip_runtime=debug,glyphflip_core=info";

/// Install a file subscriber when `GLYPHFLIP_LOG` names a file.
///
/// Returns whether logging was enabled.
pub fn init_from_env() -> io::Result<bool> {
    match env::var_os("GLYPHFLIP_LOG") {
        Some(path) if !path.is_empty() => {
            init_file(Path::new(&path))?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn init_file(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_env("GLYPHFLIP_LOG_FILTER")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    // A subscriber may already be installed (tests); keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();
    tracing::info!(path = %path.display(), "logging to file");
    Ok(())
}
