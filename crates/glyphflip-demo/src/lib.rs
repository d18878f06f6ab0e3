#![forbid(unsafe_code)]

//! Terminal host for glyphflip: renders a name and scrambles whichever
//! letter the mouse passes over.

pub mod app;
pub mod cli;
pub mod logging;
pub mod terminal;

use glyphflip::prelude::*;
use glyphflip::{Element, ElementRegistry};

use crate::app::{App, ELEMENT_ID};
use crate::cli::Opts;
use crate::terminal::TerminalSession;

/// Boot the demo with parsed options.
pub fn run(opts: &Opts) -> Result<()> {
    let config = opts.scramble_config()?;

    let mut host = ElementRegistry::new();
    host.insert(ELEMENT_ID, Element::with_text(opts.text.clone()));
    let Some(runtime) = attach(
        &mut host,
        ELEMENT_ID,
        config,
        MonotonicClock::new(),
        rand::thread_rng(),
    ) else {
        return Ok(());
    };

    let mut app = App::new(runtime);
    let session = TerminalSession::new()?;
    terminal::run(&session, &mut app, opts.exit_after_ms)?;
    Ok(())
}
