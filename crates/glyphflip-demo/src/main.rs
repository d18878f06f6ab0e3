#![forbid(unsafe_code)]

//! glyphflip demo binary entry point.

use glyphflip_demo::cli;

fn main() {
    let opts = cli::Opts::parse();

    if let Err(e) = glyphflip_demo::logging::init_from_env() {
        eprintln!("Failed to open log file: {e}");
        std::process::exit(1);
    }

    if let Err(e) = glyphflip_demo::run(&opts) {
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}
