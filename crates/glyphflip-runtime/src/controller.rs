#![forbid(unsafe_code)]

//! Per-cell scramble state machine.
//!
//! A [`ScrambleController`] owns one [`CharCell`] and at most one live
//! repeating timer. It has two states:
//!
//! ```text
//!            trigger                       tick, elapsed >= duration
//!   Idle ─────────────────▶ Scrambling ──────────────────────────────▶ Idle
//!                           │   ▲     (restore glyph, cancel timer)
//!                 trigger   │   │
//!          (cancel + restart)   │
//!                           └───┘
//! ```
//!
//! # Invariants
//!
//! 1. At most one live timer per controller. A new trigger cancels the old
//!    timer before scheduling the next one.
//! 2. Whenever the controller is [`ScrambleState::Idle`] the cell displays
//!    its original glyph.
//! 3. Blank glyphs (whitespace) never change, however often they are
//!    triggered.
//! 4. A tick from any handle other than the live session's is ignored and
//!    that handle is cancelled.
//! 5. [`cancel`](ScrambleController::cancel) on an idle controller changes
//!    nothing.

use std::time::Duration;

use glyphflip_core::event::CellId;
use glyphflip_core::scheduler::{Scheduler, TimerHandle};
use glyphflip_text::{Alphabet, CharCell, pick_random};
use rand::Rng;

use crate::config::ScrambleConfig;

/// Observable state of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrambleState {
    /// Showing the original glyph, no timer scheduled.
    Idle,
    /// A session is running.
    Scrambling,
}

/// What a tick did to the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A random glyph is now displayed.
    Scrambled(char),
    /// The glyph is blank and was left alone.
    Held,
    /// The window elapsed; the original glyph is back and the timer stopped.
    Restored,
    /// The tick belonged to a handle that is not the live session.
    Stale,
}

/// One activation of a cell, from trigger to restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Session {
    started_at: Duration,
    timer: TimerHandle,
}

/// Scramble state machine bound to one character cell.
#[derive(Debug, Clone)]
pub struct ScrambleController {
    id: CellId,
    cell: CharCell,
    config: ScrambleConfig,
    alphabet: Alphabet,
    session: Option<Session>,
}

impl ScrambleController {
    /// Bind a controller to `cell`, which sits at position `id`.
    #[must_use]
    pub fn new(id: CellId, cell: CharCell, config: ScrambleConfig) -> Self {
        Self {
            id,
            cell,
            config,
            alphabet: Alphabet::STANDARD,
            session: None,
        }
    }

    /// Position of the controlled cell.
    #[inline]
    #[must_use]
    pub fn id(&self) -> CellId {
        self.id
    }

    /// The controlled cell.
    #[inline]
    #[must_use]
    pub fn cell(&self) -> &CharCell {
        &self.cell
    }

    /// Glyph currently displayed.
    #[inline]
    #[must_use]
    pub fn displayed(&self) -> char {
        self.cell.displayed()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ScrambleState {
        if self.session.is_some() {
            ScrambleState::Scrambling
        } else {
            ScrambleState::Idle
        }
    }

    /// Whether a session is running.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// Timer of the running session.
    #[must_use]
    pub fn timer(&self) -> Option<TimerHandle> {
        self.session.map(|s| s.timer)
    }

    /// When the running session started.
    #[must_use]
    pub fn started_at(&self) -> Option<Duration> {
        self.session.map(|s| s.started_at)
    }

    /// Start a session at `now`, replacing any running one.
    ///
    /// The replaced session's timer is cancelled before the new timer is
    /// scheduled, so the scramble window always restarts from `now`.
    pub fn trigger<S>(&mut self, now: Duration, scheduler: &mut S)
    where
        S: Scheduler<CellId> + ?Sized,
    {
        let restarted = match self.session.take() {
            Some(previous) => {
                scheduler.cancel(previous.timer);
                true
            }
            None => false,
        };
        let timer = scheduler.schedule_repeating(self.config.tick(), self.id);
        self.session = Some(Session {
            started_at: now,
            timer,
        });
        tracing::debug!(
            cell = self.id.index(),
            timer = timer.id(),
            restarted,
            at_ms = now.as_millis() as u64,
            "scramble session started"
        );
    }

    /// Handle a tick from `handle` at time `now`.
    pub fn on_tick<S, R>(
        &mut self,
        handle: TimerHandle,
        now: Duration,
        scheduler: &mut S,
        rng: &mut R,
    ) -> TickOutcome
    where
        S: Scheduler<CellId> + ?Sized,
        R: Rng + ?Sized,
    {
        let Some(session) = self.session.filter(|s| s.timer == handle) else {
            scheduler.cancel(handle);
            tracing::trace!(cell = self.id.index(), timer = handle.id(), "stale tick");
            return TickOutcome::Stale;
        };

        let elapsed = now.saturating_sub(session.started_at);
        if elapsed < self.config.duration() {
            if self.cell.is_blank() {
                return TickOutcome::Held;
            }
            let glyph = pick_random(&self.alphabet, rng);
            self.cell.set_displayed(glyph);
            tracing::trace!(cell = self.id.index(), %glyph, "scrambled");
            return TickOutcome::Scrambled(glyph);
        }

        self.finish(scheduler);
        tracing::debug!(
            cell = self.id.index(),
            elapsed_ms = elapsed.as_millis() as u64,
            "scramble session restored"
        );
        TickOutcome::Restored
    }

    /// Stop the running session and restore the original glyph.
    ///
    /// Returns `false`, changing nothing, when no session is running.
    pub fn cancel<S>(&mut self, scheduler: &mut S) -> bool
    where
        S: Scheduler<CellId> + ?Sized,
    {
        if self.session.is_none() {
            return false;
        }
        self.finish(scheduler);
        tracing::debug!(cell = self.id.index(), "scramble session cancelled");
        true
    }

    /// React to the pointer leaving the cell.
    ///
    /// Only cancels when the configuration asks for restore-on-leave.
    /// Returns whether a session was cancelled.
    pub fn pointer_left<S>(&mut self, scheduler: &mut S) -> bool
    where
        S: Scheduler<CellId> + ?Sized,
    {
        self.config.restore_on_leave && self.cancel(scheduler)
    }

    fn finish<S>(&mut self, scheduler: &mut S)
    where
        S: Scheduler<CellId> + ?Sized,
    {
        if let Some(session) = self.session.take() {
            scheduler.cancel(session.timer);
        }
        self.cell.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphflip_core::clock::{Clock, ManualClock};
    use glyphflip_core::scheduler::TimerQueue;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct Rig {
        clock: ManualClock,
        timers: TimerQueue<CellId, ManualClock>,
        rng: StdRng,
    }

    impl Rig {
        fn new() -> Self {
            let clock = ManualClock::new();
            Self {
                timers: TimerQueue::new(clock.clone()),
                clock,
                rng: StdRng::seed_from_u64(0xC0FFEE),
            }
        }

        /// Advance to `to` ms, feeding every due tick to `ctl`.
        fn run_until(&mut self, ctl: &mut ScrambleController, to: u64) -> Vec<TickOutcome> {
            let target = Duration::from_millis(to);
            let mut outcomes = Vec::new();
            while let Some(deadline) = self.timers.next_deadline() {
                if deadline > target {
                    break;
                }
                self.clock.set(deadline);
                while let Some(fired) = self.timers.pop_due() {
                    let now = self.clock.now();
                    outcomes.push(ctl.on_tick(fired.handle, now, &mut self.timers, &mut self.rng));
                }
            }
            self.clock.set(target);
            outcomes
        }

        fn now(&self) -> Duration {
            self.clock.now()
        }
    }

    fn controller(glyph: char) -> ScrambleController {
        ScrambleController::new(CellId(0), CharCell::new(glyph), ScrambleConfig::default())
    }

    #[test]
    fn starts_idle() {
        let ctl = controller('A');
        assert_eq!(ctl.state(), ScrambleState::Idle);
        assert_eq!(ctl.displayed(), 'A');
        assert_eq!(ctl.timer(), None);
    }

    #[test]
    fn trigger_schedules_exactly_one_timer() {
        let mut rig = Rig::new();
        let mut ctl = controller('A');
        ctl.trigger(rig.now(), &mut rig.timers);
        assert_eq!(ctl.state(), ScrambleState::Scrambling);
        assert_eq!(rig.timers.live_count(), 1);
    }

    #[test]
    fn ticks_draw_from_alphabet_then_restore() {
        let mut rig = Rig::new();
        let mut ctl = controller('A');
        ctl.trigger(rig.now(), &mut rig.timers);

        let outcomes = rig.run_until(&mut ctl, 448);
        // Ticks at 28..=392 scramble (14 of them); the tick at 420 restores.
        assert_eq!(outcomes.len(), 15);
        for outcome in &outcomes[..14] {
            match outcome {
                TickOutcome::Scrambled(c) => assert!(Alphabet::STANDARD.contains(*c)),
                other => panic!("expected scramble, got {other:?}"),
            }
        }
        assert_eq!(outcomes[14], TickOutcome::Restored);
        assert_eq!(ctl.state(), ScrambleState::Idle);
        assert_eq!(ctl.displayed(), 'A');
        assert_eq!(rig.timers.live_count(), 0);
    }

    #[test]
    fn blank_glyph_is_held() {
        let mut rig = Rig::new();
        let mut ctl = controller(' ');
        ctl.trigger(rig.now(), &mut rig.timers);
        let outcomes = rig.run_until(&mut ctl, 500);
        assert!(outcomes[..outcomes.len() - 1].iter().all(|o| *o == TickOutcome::Held));
        assert_eq!(outcomes.last(), Some(&TickOutcome::Restored));
        assert_eq!(ctl.displayed(), ' ');
    }

    #[test]
    fn retrigger_replaces_timer_and_restarts_window() {
        let mut rig = Rig::new();
        let mut ctl = controller('A');
        ctl.trigger(rig.now(), &mut rig.timers);
        let first = ctl.timer().unwrap();

        rig.run_until(&mut ctl, 100);
        ctl.trigger(rig.now(), &mut rig.timers);
        let second = ctl.timer().unwrap();

        assert_ne!(first, second);
        assert!(!rig.timers.is_live(first));
        assert_eq!(rig.timers.live_count(), 1);
        assert_eq!(ctl.started_at(), Some(Duration::from_millis(100)));

        rig.run_until(&mut ctl, 500);
        assert!(ctl.is_running(), "window restarted at 100ms must outlast 420ms");
        rig.run_until(&mut ctl, 548);
        assert!(!ctl.is_running());
        assert_eq!(ctl.displayed(), 'A');
    }

    #[test]
    fn stale_tick_is_ignored_and_cancelled() {
        let mut rig = Rig::new();
        let mut ctl = controller('A');
        let stray = rig.timers.schedule_repeating(Duration::from_millis(5), CellId(0));
        ctl.trigger(rig.now(), &mut rig.timers);
        let displayed = ctl.displayed();

        let outcome = ctl.on_tick(stray, rig.now(), &mut rig.timers, &mut rig.rng);
        assert_eq!(outcome, TickOutcome::Stale);
        assert!(!rig.timers.is_live(stray));
        assert!(ctl.is_running());
        assert_eq!(ctl.displayed(), displayed);
    }

    #[test]
    fn cancel_restores_and_is_idempotent() {
        let mut rig = Rig::new();
        let mut ctl = controller('Z');
        ctl.trigger(rig.now(), &mut rig.timers);
        rig.run_until(&mut ctl, 56);

        assert!(ctl.cancel(&mut rig.timers));
        assert_eq!(ctl.displayed(), 'Z');
        assert_eq!(rig.timers.live_count(), 0);

        let before = ctl.clone();
        assert!(!ctl.cancel(&mut rig.timers));
        assert_eq!(ctl.state(), before.state());
        assert_eq!(ctl.cell(), before.cell());
    }

    #[test]
    fn pointer_left_is_inert_by_default() {
        let mut rig = Rig::new();
        let mut ctl = controller('A');
        ctl.trigger(rig.now(), &mut rig.timers);
        assert!(!ctl.pointer_left(&mut rig.timers));
        assert!(ctl.is_running());
    }

    #[test]
    fn pointer_left_restores_when_configured() {
        let mut rig = Rig::new();
        let config = ScrambleConfig::default().with_restore_on_leave(true);
        let mut ctl = ScrambleController::new(CellId(0), CharCell::new('A'), config);
        ctl.trigger(rig.now(), &mut rig.timers);
        rig.run_until(&mut ctl, 84);

        assert!(ctl.pointer_left(&mut rig.timers));
        assert_eq!(ctl.state(), ScrambleState::Idle);
        assert_eq!(ctl.displayed(), 'A');
        assert!(rig.run_until(&mut ctl, 600).is_empty());
    }

    #[test]
    fn zero_duration_restores_on_first_tick() {
        let mut rig = Rig::new();
        let config = ScrambleConfig::default().with_duration_ms(0);
        let mut ctl = ScrambleController::new(CellId(0), CharCell::new('A'), config);
        ctl.trigger(rig.now(), &mut rig.timers);
        assert_eq!(rig.run_until(&mut ctl, 28), vec![TickOutcome::Restored]);
    }
}
