#![forbid(unsafe_code)]

//! A row of independently scrambling cells.
//!
//! [`ScrambleSurface`] is the container the segmenter fills. It owns one
//! [`ScrambleController`] per cell and routes pointer events and fired ticks
//! to the controller they address. Cells never coordinate with each other.

use std::time::Duration;

use glyphflip_core::event::{CellId, PointerEvent};
use glyphflip_core::scheduler::{Fired, Scheduler};
use glyphflip_text::{CellSink, CharCell, segment_into};
use rand::Rng;

use crate::config::ScrambleConfig;
use crate::controller::{ScrambleController, ScrambleState, TickOutcome};

/// Container of scramble controllers, one per source character.
#[derive(Debug, Clone)]
pub struct ScrambleSurface {
    config: ScrambleConfig,
    controllers: Vec<ScrambleController>,
}

impl ScrambleSurface {
    /// An empty surface.
    #[must_use]
    pub fn new(config: ScrambleConfig) -> Self {
        Self {
            config,
            controllers: Vec::new(),
        }
    }

    /// Segment `source` into a fresh surface.
    #[must_use]
    pub fn from_text(source: &str, config: ScrambleConfig) -> Self {
        let mut surface = Self::new(config);
        segment_into(&mut surface, source);
        surface
    }

    /// Shared configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ScrambleConfig {
        &self.config
    }

    /// Number of cells.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    /// Whether the surface has no cells.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// Controller for `id`.
    #[must_use]
    pub fn controller(&self, id: CellId) -> Option<&ScrambleController> {
        self.controllers.get(id.index())
    }

    /// Every controller, in source order.
    pub fn controllers(&self) -> impl ExactSizeIterator<Item = &ScrambleController> {
        self.controllers.iter()
    }

    /// Snapshot of the cells, in source order.
    #[must_use]
    pub fn cells(&self) -> Vec<CharCell> {
        self.controllers.iter().map(|c| c.cell().clone()).collect()
    }

    /// Text as currently displayed.
    #[must_use]
    pub fn displayed_text(&self) -> String {
        self.controllers.iter().map(ScrambleController::displayed).collect()
    }

    /// Text as segmented.
    #[must_use]
    pub fn original_text(&self) -> String {
        self.controllers.iter().map(|c| c.cell().original()).collect()
    }

    /// Number of cells with a running session.
    #[must_use]
    pub fn running_count(&self) -> usize {
        self.controllers.iter().filter(|c| c.is_running()).count()
    }

    /// Whether every cell is idle and showing its original glyph.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.controllers
            .iter()
            .all(|c| c.state() == ScrambleState::Idle && c.cell().is_restored())
    }

    /// Deliver a pointer event. Events for unknown cells are ignored.
    ///
    /// Returns whether the cell's display may have changed.
    pub fn handle_pointer<S>(
        &mut self,
        event: PointerEvent,
        now: Duration,
        scheduler: &mut S,
    ) -> bool
    where
        S: Scheduler<CellId> + ?Sized,
    {
        let Some(ctl) = self.controllers.get_mut(event.cell().index()) else {
            tracing::trace!(cell = event.cell().index(), "pointer event outside surface");
            return false;
        };
        match event {
            PointerEvent::Entered(_) => {
                ctl.trigger(now, scheduler);
                false
            }
            PointerEvent::Left(_) => ctl.pointer_left(scheduler),
        }
    }

    /// Start (or restart) the scramble of cell `id`.
    ///
    /// Returns `false` when `id` is outside the surface.
    pub fn trigger<S>(&mut self, id: CellId, now: Duration, scheduler: &mut S) -> bool
    where
        S: Scheduler<CellId> + ?Sized,
    {
        match self.controllers.get_mut(id.index()) {
            Some(ctl) => {
                ctl.trigger(now, scheduler);
                true
            }
            None => false,
        }
    }

    /// Cancel the scramble of cell `id` and restore its glyph.
    ///
    /// Returns `false` when the cell was idle or does not exist.
    pub fn cancel<S>(&mut self, id: CellId, scheduler: &mut S) -> bool
    where
        S: Scheduler<CellId> + ?Sized,
    {
        self.controllers
            .get_mut(id.index())
            .is_some_and(|ctl| ctl.cancel(scheduler))
    }

    /// Route a fired tick to the controller that scheduled it.
    ///
    /// Ticks addressed past the end of the surface are cancelled.
    pub fn handle_tick<S, R>(
        &mut self,
        fired: &Fired<CellId>,
        now: Duration,
        scheduler: &mut S,
        rng: &mut R,
    ) -> TickOutcome
    where
        S: Scheduler<CellId> + ?Sized,
        R: Rng + ?Sized,
    {
        match self.controllers.get_mut(fired.payload.index()) {
            Some(ctl) => ctl.on_tick(fired.handle, now, scheduler, rng),
            None => {
                scheduler.cancel(fired.handle);
                TickOutcome::Stale
            }
        }
    }

    /// Cancel every running session. Returns how many were cancelled.
    pub fn cancel_all<S>(&mut self, scheduler: &mut S) -> usize
    where
        S: Scheduler<CellId> + ?Sized,
    {
        let mut cancelled = 0;
        for ctl in &mut self.controllers {
            if ctl.cancel(scheduler) {
                cancelled += 1;
            }
        }
        cancelled
    }

    /// Replace the surface's content with the cells of `source`.
    ///
    /// Running sessions are cancelled first so no timer outlives its cell.
    /// Returns the new number of cells.
    pub fn load_text<S>(&mut self, source: &str, scheduler: &mut S) -> usize
    where
        S: Scheduler<CellId> + ?Sized,
    {
        self.cancel_all(scheduler);
        segment_into(self, source)
    }
}

impl CellSink for ScrambleSurface {
    /// Drops every controller. Call [`ScrambleSurface::cancel_all`] first if
    /// any may still hold a timer.
    fn clear(&mut self) {
        self.controllers.clear();
    }

    fn push(&mut self, cell: CharCell) {
        let id = CellId(self.controllers.len());
        self.controllers
            .push(ScrambleController::new(id, cell, self.config));
    }
}
