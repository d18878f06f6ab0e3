//! Property-based invariant tests for the timer queue.
//!
//! 1. Ticks come out in non-decreasing due order.
//! 2. Each timer fires exactly `floor(elapsed / interval)` times.
//! 3. Cancelled timers never fire again, and cancelling twice is a no-op.
//! 4. Hover transitions always leave before they enter.

use std::time::Duration;

use glyphflip_core::clock::ManualClock;
use glyphflip_core::event::{CellId, PointerEvent};
use glyphflip_core::hover::HoverTracker;
use glyphflip_core::scheduler::{Scheduler, TimerQueue};
use proptest::prelude::*;

fn intervals_strategy() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(1u64..=60, 1..8)
}

proptest! {
    #[test]
    fn ticks_are_chronological(intervals in intervals_strategy(), horizon in 0u64..=500) {
        let clock = ManualClock::new();
        let mut timers = TimerQueue::new(clock.clone());
        for (idx, ms) in intervals.iter().enumerate() {
            timers.schedule_repeating(Duration::from_millis(*ms), idx);
        }
        clock.advance(Duration::from_millis(horizon));

        let mut last = Duration::ZERO;
        while let Some(fired) = timers.pop_due() {
            prop_assert!(fired.due >= last, "out of order: {:?} after {:?}", fired.due, last);
            prop_assert!(fired.due <= clock_now(&timers));
            last = fired.due;
        }
    }

    #[test]
    fn fire_count_matches_elapsed_intervals(
        intervals in intervals_strategy(),
        horizon in 0u64..=500
    ) {
        let clock = ManualClock::new();
        let mut timers = TimerQueue::new(clock.clone());
        for (idx, ms) in intervals.iter().enumerate() {
            timers.schedule_repeating(Duration::from_millis(*ms), idx);
        }
        clock.advance(Duration::from_millis(horizon));

        let mut counts = vec![0u64; intervals.len()];
        while let Some(fired) = timers.pop_due() {
            counts[fired.payload] += 1;
        }
        for (idx, ms) in intervals.iter().enumerate() {
            prop_assert_eq!(counts[idx], horizon / ms, "timer {} with interval {}ms", idx, ms);
        }
    }

    #[test]
    fn cancelled_timers_stay_silent(intervals in intervals_strategy(), cancel_at in 0u64..=200) {
        let clock = ManualClock::new();
        let mut timers = TimerQueue::new(clock.clone());
        let handles: Vec<_> = intervals
            .iter()
            .enumerate()
            .map(|(idx, ms)| timers.schedule_repeating(Duration::from_millis(*ms), idx))
            .collect();

        clock.advance(Duration::from_millis(cancel_at));
        let victim = handles[0];
        prop_assert!(timers.cancel(victim));
        prop_assert!(!timers.cancel(victim));

        clock.advance(Duration::from_millis(500));
        while let Some(fired) = timers.pop_due() {
            prop_assert_ne!(fired.handle, victim);
        }
        prop_assert_eq!(timers.live_count(), intervals.len() - 1);
    }

    #[test]
    fn hover_never_enters_before_leaving(
        hits in prop::collection::vec(prop::option::of(0usize..6), 0..40)
    ) {
        let mut hover = HoverTracker::new();
        let mut hovered: Option<CellId> = None;
        for hit in hits {
            for event in hover.update(hit.map(CellId)).events() {
                match event {
                    PointerEvent::Left(id) => {
                        prop_assert_eq!(hovered, Some(id));
                        hovered = None;
                    }
                    PointerEvent::Entered(id) => {
                        prop_assert_eq!(hovered, None);
                        hovered = Some(id);
                    }
                }
            }
            prop_assert_eq!(hovered, hover.current());
        }
    }
}

fn clock_now(timers: &TimerQueue<usize, ManualClock>) -> Duration {
    timers.now()
}
