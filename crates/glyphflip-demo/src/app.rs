#![forbid(unsafe_code)]

//! Demo application state: layout, hover routing, and the scramble runtime.
//!
//! Everything here is terminal-agnostic; [`crate::terminal`] owns the I/O.

use std::time::Duration;

use glyphflip::prelude::*;
use glyphflip::{CharCell, cell_at_column};
use glyphflip::text::strip_width;
use rand::Rng;
use unicode_width::UnicodeWidthChar;

/// Longest the loop sleeps when nothing is scheduled.
pub const IDLE_POLL: Duration = Duration::from_millis(250);

/// Element id the demo registers its text under.
pub const ELEMENT_ID: &str = "scrambleName";

/// Where the strip is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Layout {
    /// Column of the first cell.
    pub origin_x: u16,
    /// Row the strip sits on.
    pub row: u16,
}

/// The demo model.
#[derive(Debug)]
pub struct App<C, R> {
    runtime: ScrambleRuntime<C, R>,
    cells: Vec<CharCell>,
    hover: HoverTracker,
    layout: Layout,
    dirty: bool,
}

impl<C: Clock, R: Rng> App<C, R> {
    /// Wrap an attached runtime.
    pub fn new(runtime: ScrambleRuntime<C, R>) -> Self {
        let cells = runtime.surface().cells();
        Self {
            runtime,
            cells,
            hover: HoverTracker::new(),
            layout: Layout::default(),
            dirty: true,
        }
    }

    /// The scramble runtime.
    pub fn runtime(&self) -> &ScrambleRuntime<C, R> {
        &self.runtime
    }

    /// Current layout.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Center the strip in a `cols` x `rows` screen.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        let width = u16::try_from(strip_width(&self.cells)).unwrap_or(u16::MAX);
        self.layout = Layout {
            origin_x: cols.saturating_sub(width) / 2,
            row: rows / 2,
        };
        self.dirty = true;
    }

    /// Pointer moved to (`column`, `row`).
    pub fn on_pointer(&mut self, column: u16, row: u16) {
        let hit = if row == self.layout.row {
            cell_at_column(&self.cells, self.layout.origin_x, column)
        } else {
            None
        };
        let transition = self.hover.update(hit);
        self.route(transition);
    }

    /// The pointer left the window.
    pub fn on_pointer_gone(&mut self) {
        let transition = self.hover.reset();
        self.route(transition);
    }

    fn route(&mut self, transition: glyphflip::HoverTransition) {
        for event in transition.events() {
            if self.runtime.handle_pointer(event) {
                self.dirty = true;
            }
        }
    }

    /// Dispatch due ticks. Returns how many ran.
    pub fn run_due(&mut self) -> usize {
        let ran = self.runtime.run_due().len();
        if ran > 0 {
            self.dirty = true;
        }
        ran
    }

    /// How long the event loop may block waiting for input.
    pub fn poll_timeout(&mut self) -> Duration {
        self.runtime
            .time_until_next_tick()
            .map_or(IDLE_POLL, |wait| wait.min(IDLE_POLL))
    }

    /// Whether a redraw is pending; clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// The strip as it should appear on screen.
    ///
    /// Each cell keeps its original width: a narrow scrambled glyph standing
    /// in for a wide original is padded with spaces, and a zero-width
    /// original is drawn as a space.
    pub fn render_line(&self) -> String {
        let mut line = String::new();
        for (ctl, cell) in self.runtime.surface().controllers().zip(&self.cells) {
            let glyph = ctl.displayed();
            // Zero-width and control glyphs still occupy the column hit-testing gives them.
            let shown_width = match glyph.width() {
                Some(width) if width > 0 => {
                    line.push(glyph);
                    width
                }
                _ => {
                    line.push(' ');
                    1
                }
            };
            for _ in shown_width..cell.width() {
                line.push(' ');
            }
        }
        line
    }
}
