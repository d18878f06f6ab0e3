#![forbid(unsafe_code)]

//! Event-loop glue: a surface, its timers, and a random source.
//!
//! [`ScrambleRuntime`] is what a host keeps around after initialization. The
//! host forwards pointer events with
//! [`handle_pointer`](ScrambleRuntime::handle_pointer), and calls
//! [`run_due`](ScrambleRuntime::run_due) whenever
//! [`time_until_next_tick`](ScrambleRuntime::time_until_next_tick) has
//! elapsed. Everything runs on the caller's thread.

use std::time::Duration;

use glyphflip_core::clock::Clock;
use glyphflip_core::event::{CellId, PointerEvent};
use glyphflip_core::scheduler::{Scheduler, TimerQueue};
use rand::Rng;

use crate::controller::TickOutcome;
use crate::surface::ScrambleSurface;

/// One dispatched tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickRecord {
    /// Clock reading when the tick was handled.
    pub at: Duration,
    /// Cell the tick was addressed to.
    pub cell: CellId,
    /// What the tick did.
    pub outcome: TickOutcome,
}

/// A scramble surface wired to a timer queue and a random source.
#[derive(Debug)]
pub struct ScrambleRuntime<C, R> {
    surface: ScrambleSurface,
    timers: TimerQueue<CellId, C>,
    rng: R,
}

impl<C: Clock, R: Rng> ScrambleRuntime<C, R> {
    /// Drive `surface` with timers read from `clock`.
    pub fn new(surface: ScrambleSurface, clock: C, rng: R) -> Self {
        Self {
            surface,
            timers: TimerQueue::new(clock),
            rng,
        }
    }

    /// The driven surface.
    #[inline]
    pub fn surface(&self) -> &ScrambleSurface {
        &self.surface
    }

    /// Current clock reading.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Number of live timers. Never exceeds the number of running cells.
    pub fn live_timers(&self) -> usize {
        self.timers.live_count()
    }

    /// Deliver a pointer event at the current time.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        let now = self.timers.now();
        self.surface.handle_pointer(event, now, &mut self.timers)
    }

    /// Start (or restart) the scramble of one cell.
    pub fn trigger(&mut self, id: CellId) -> bool {
        let now = self.timers.now();
        self.surface.trigger(id, now, &mut self.timers)
    }

    /// Cancel one cell's scramble and restore its glyph.
    pub fn cancel(&mut self, id: CellId) -> bool {
        self.surface.cancel(id, &mut self.timers)
    }

    /// Cancel every running scramble.
    pub fn cancel_all(&mut self) -> usize {
        self.surface.cancel_all(&mut self.timers)
    }

    /// Replace the displayed text, cancelling anything in flight.
    pub fn load_text(&mut self, source: &str) -> usize {
        self.surface.load_text(source, &mut self.timers)
    }

    /// Dispatch every tick that is due now, in chronological order.
    pub fn run_due(&mut self) -> Vec<TickRecord> {
        let now = self.timers.now();
        let mut records = Vec::new();
        while let Some(fired) = self.timers.pop_due() {
            let outcome = self
                .surface
                .handle_tick(&fired, now, &mut self.timers, &mut self.rng);
            records.push(TickRecord {
                at: now,
                cell: fired.payload,
                outcome,
            });
        }
        records
    }

    /// Due time of the earliest pending tick.
    pub fn next_deadline(&mut self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// How long a host may sleep before the next tick is due.
    ///
    /// `None` when nothing is scheduled; `Some(ZERO)` when a tick is overdue.
    pub fn time_until_next_tick(&mut self) -> Option<Duration> {
        let now = self.timers.now();
        self.next_deadline().map(|deadline| deadline.saturating_sub(now))
    }

    /// Tear down: cancel every session and hand back the surface.
    pub fn into_surface(mut self) -> ScrambleSurface {
        self.surface.cancel_all(&mut self.timers);
        self.surface
    }
}
