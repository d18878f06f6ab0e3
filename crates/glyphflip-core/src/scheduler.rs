#![forbid(unsafe_code)]

//! Repeating timers for a single-threaded cooperative event loop.
//!
//! A [`Scheduler`] hands out [`TimerHandle`]s for repeating timers. Instead
//! of invoking closures, due ticks are surfaced as [`Fired`] messages carrying
//! the payload given at scheduling time; the owner of the queue routes each
//! message to whoever scheduled it. This keeps tick handlers free to mutate
//! their own state and to cancel or reschedule timers mid-dispatch.
//!
//! # Invariants
//!
//! 1. Handles are never reused. A cancelled or stale handle can never alias
//!    a newer timer.
//! 2. Cancellation is immediate: once [`Scheduler::cancel`] returns, the
//!    handle yields no further ticks, even if some were already due.
//! 3. Cancellation is idempotent: cancelling a dead handle returns `false`
//!    and changes nothing.
//! 4. [`TimerQueue::pop_due`] yields ticks in strict chronological order of
//!    their due times; ties break by scheduling order.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use glyphflip_core::clock::ManualClock;
//! use glyphflip_core::scheduler::{Scheduler, TimerQueue};
//!
//! let clock = ManualClock::new();
//! let mut timers = TimerQueue::new(clock.clone());
//! let handle = timers.schedule_repeating(Duration::from_millis(28), "cell-0");
//!
//! clock.advance(Duration::from_millis(28));
//! let fired = timers.pop_due().unwrap();
//! assert_eq!(fired.handle, handle);
//! assert_eq!(fired.payload, "cell-0");
//!
//! assert!(timers.cancel(handle));
//! assert!(!timers.cancel(handle));
//! ```

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;

use crate::clock::Clock;

/// Shortest interval a timer may repeat at.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Opaque identifier for one scheduled repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Raw numeric id, for logging.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// A tick that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    /// Timer that produced this tick.
    pub handle: TimerHandle,
    /// Payload given to [`Scheduler::schedule_repeating`].
    pub payload: T,
    /// Time at which the tick was due (may be earlier than the current time
    /// if the host polled late).
    pub due: Duration,
}

/// Capability to schedule and cancel repeating timers.
pub trait Scheduler<T> {
    /// Schedule `payload` to fire every `interval`, starting one interval
    /// from now.
    fn schedule_repeating(&mut self, interval: Duration, payload: T) -> TimerHandle;

    /// Stop a timer. Returns `true` if the handle was live.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    /// Whether `handle` still refers to a scheduled timer.
    fn is_live(&self, handle: TimerHandle) -> bool;

    /// Number of live timers.
    fn live_count(&self) -> usize;
}

#[derive(Debug)]
struct TimerSlot<T> {
    interval: Duration,
    next_due: Duration,
    payload: T,
}

/// Heap key: due time, then insertion sequence, then timer id.
type QueueEntry = Reverse<(Duration, u64, u64)>;

/// Clock-driven [`Scheduler`] implementation.
///
/// The queue never runs anything on its own. The host loop calls
/// [`pop_due`](Self::pop_due) until it returns `None`, dispatching each tick
/// before asking for the next one.
#[derive(Debug)]
pub struct TimerQueue<T, C> {
    clock: C,
    slots: HashMap<u64, TimerSlot<T>>,
    queue: BinaryHeap<QueueEntry>,
    next_id: u64,
    next_seq: u64,
}

impl<T: Clone, C: Clock> TimerQueue<T, C> {
    /// Create an empty queue reading time from `clock`.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            slots: HashMap::new(),
            queue: BinaryHeap::new(),
            next_id: 1,
            next_seq: 0,
        }
    }

    /// Current reading of the queue's clock.
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Earliest due time among live timers.
    pub fn next_deadline(&mut self) -> Option<Duration> {
        self.discard_stale();
        self.queue.peek().map(|Reverse((due, _, _))| *due)
    }

    /// Take the next tick whose due time is at or before the clock's
    /// current reading.
    ///
    /// The timer is rescheduled one interval after its due time before the
    /// tick is returned, so a host that polls late sees every missed tick in
    /// order rather than a single coalesced one.
    pub fn pop_due(&mut self) -> Option<Fired<T>> {
        let now = self.clock.now();
        self.discard_stale();
        let Reverse((due, _, id)) = *self.queue.peek()?;
        if due > now {
            return None;
        }
        self.queue.pop();

        let slot = self.slots.get_mut(&id)?;
        slot.next_due = due.saturating_add(slot.interval);
        let payload = slot.payload.clone();
        let next_due = slot.next_due;
        self.push_entry(next_due, id);

        crate::trace!(timer = id, due_ms = due.as_millis() as u64, "timer fired");
        Some(Fired {
            handle: TimerHandle(id),
            payload,
            due,
        })
    }

    fn push_entry(&mut self, due: Duration, id: u64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse((due, seq, id)));
    }

    /// Drop heap entries for cancelled timers or superseded due times.
    fn discard_stale(&mut self) {
        while let Some(&Reverse((due, _, id))) = self.queue.peek() {
            match self.slots.get(&id) {
                Some(slot) if slot.next_due == due => break,
                _ => {
                    self.queue.pop();
                }
            }
        }
    }
}

impl<T: Clone, C: Clock> Scheduler<T> for TimerQueue<T, C> {
    fn schedule_repeating(&mut self, interval: Duration, payload: T) -> TimerHandle {
        let interval = interval.max(MIN_INTERVAL);
        let id = self.next_id;
        self.next_id += 1;
        let next_due = self.clock.now().saturating_add(interval);
        self.slots.insert(
            id,
            TimerSlot {
                interval,
                next_due,
                payload,
            },
        );
        self.push_entry(next_due, id);
        crate::trace!(
            timer = id,
            interval_ms = interval.as_millis() as u64,
            "timer scheduled"
        );
        TimerHandle(id)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let removed = self.slots.remove(&handle.0).is_some();
        if removed {
            crate::trace!(timer = handle.0, "timer cancelled");
        }
        removed
    }

    fn is_live(&self, handle: TimerHandle) -> bool {
        self.slots.contains_key(&handle.0)
    }

    fn live_count(&self) -> usize {
        self.slots.len()
    }
}
