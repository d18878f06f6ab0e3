#![forbid(unsafe_code)]

//! Deterministic scramble simulator for testing.
//!
//! `Simulator` runs a [`ScrambleRuntime`] on simulated time with a seeded
//! random source. Time only moves through [`advance_to`](Simulator::advance_to)
//! and [`advance`](Simulator::advance), which stop at every tick deadline on
//! the way so each tick is handled at exactly its due time.
//!
//! # Example
//!
//! ```
//! use glyphflip_runtime::config::ScrambleConfig;
//! use glyphflip_runtime::simulator::Simulator;
//!
//! let mut sim = Simulator::new("AB C", ScrambleConfig::default(), 42);
//! sim.enter(0);
//! sim.advance_to_ms(448);
//! assert_eq!(sim.displayed_text(), "AB C");
//! assert!(sim.surface().is_settled());
//! ```

use std::time::Duration;

use glyphflip_core::clock::ManualClock;
use glyphflip_core::event::{CellId, PointerEvent};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::ScrambleConfig;
use crate::controller::ScrambleState;
use crate::driver::{ScrambleRuntime, TickRecord};
use crate::surface::ScrambleSurface;

/// Simulated-time harness around a [`ScrambleRuntime`].
#[derive(Debug)]
pub struct Simulator {
    clock: ManualClock,
    runtime: ScrambleRuntime<ManualClock, StdRng>,
    ticks: Vec<TickRecord>,
}

impl Simulator {
    /// Segment `text` and start the clock at zero.
    #[must_use]
    pub fn new(text: &str, config: ScrambleConfig, seed: u64) -> Self {
        let clock = ManualClock::new();
        let surface = ScrambleSurface::from_text(text, config);
        let runtime = ScrambleRuntime::new(surface, clock.clone(), StdRng::seed_from_u64(seed));
        Self {
            clock,
            runtime,
            ticks: Vec::new(),
        }
    }

    /// Current simulated time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.runtime.now()
    }

    /// The runtime under simulation.
    pub fn runtime(&mut self) -> &mut ScrambleRuntime<ManualClock, StdRng> {
        &mut self.runtime
    }

    /// The simulated surface.
    #[must_use]
    pub fn surface(&self) -> &ScrambleSurface {
        self.runtime.surface()
    }

    /// Pointer enters cell `idx` now.
    pub fn enter(&mut self, idx: usize) {
        self.runtime.handle_pointer(PointerEvent::Entered(CellId(idx)));
    }

    /// Pointer leaves cell `idx` now.
    pub fn leave(&mut self, idx: usize) {
        self.runtime.handle_pointer(PointerEvent::Left(CellId(idx)));
    }

    /// Cancel cell `idx` now.
    pub fn cancel(&mut self, idx: usize) -> bool {
        self.runtime.cancel(CellId(idx))
    }

    /// Run time forward to `target`, handling every tick at its due time.
    ///
    /// Targets in the past leave the clock where it is.
    pub fn advance_to(&mut self, target: Duration) {
        while let Some(deadline) = self.runtime.next_deadline() {
            if deadline > target {
                break;
            }
            self.clock.set(deadline);
            let records = self.runtime.run_due();
            self.ticks.extend(records);
        }
        self.clock.set(target);
    }

    /// [`advance_to`](Self::advance_to) with a millisecond target.
    pub fn advance_to_ms(&mut self, target_ms: u64) {
        self.advance_to(Duration::from_millis(target_ms));
    }

    /// Run time forward by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        let target = self.now().saturating_add(dt);
        self.advance_to(target);
    }

    /// Glyph displayed by cell `idx`.
    #[must_use]
    pub fn displayed(&self, idx: usize) -> Option<char> {
        self.surface().controller(CellId(idx)).map(|c| c.displayed())
    }

    /// State of cell `idx`.
    #[must_use]
    pub fn state(&self, idx: usize) -> Option<ScrambleState> {
        self.surface().controller(CellId(idx)).map(|c| c.state())
    }

    /// Whole displayed text.
    #[must_use]
    pub fn displayed_text(&self) -> String {
        self.surface().displayed_text()
    }

    /// Every tick handled so far, oldest first.
    #[must_use]
    pub fn ticks(&self) -> &[TickRecord] {
        &self.ticks
    }

    /// Ticks handled for cell `idx`.
    pub fn ticks_for(&self, idx: usize) -> impl Iterator<Item = &TickRecord> {
        self.ticks.iter().filter(move |t| t.cell == CellId(idx))
    }

    /// Forget recorded ticks.
    pub fn clear_ticks(&mut self) {
        self.ticks.clear();
    }
}
