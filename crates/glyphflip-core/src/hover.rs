#![forbid(unsafe_code)]

//! Hover tracking: raw hit-test results to enter/leave transitions.
//!
//! Hosts that only report pointer positions (a terminal, for instance) feed
//! the cell under the pointer after every motion into
//! [`HoverTracker::update`]. The tracker remembers which cell is hovered and
//! emits [`PointerEvent::Left`] / [`PointerEvent::Entered`] exactly when that
//! changes.
//!
//! # Invariants
//!
//! 1. Repeated hits on the same cell emit nothing.
//! 2. A change of target always emits `Left(old)` before `Entered(new)`.
//! 3. Every `Entered(x)` is eventually matched by at most one `Left(x)`.

use crate::event::{CellId, PointerEvent};

/// Enter/leave pair produced by one hover update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverTransition {
    /// Cell the pointer moved off, if any.
    pub left: Option<CellId>,
    /// Cell the pointer moved onto, if any.
    pub entered: Option<CellId>,
}

impl HoverTransition {
    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.entered.is_none()
    }

    /// The transition as pointer events, `Left` first.
    pub fn events(self) -> impl Iterator<Item = PointerEvent> {
        self.left
            .map(PointerEvent::Left)
            .into_iter()
            .chain(self.entered.map(PointerEvent::Entered))
    }
}

/// Tracks the currently hovered cell.
#[derive(Debug, Clone, Default)]
pub struct HoverTracker {
    current: Option<CellId>,
}

impl HoverTracker {
    /// Create a tracker with nothing hovered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell currently under the pointer.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<CellId> {
        self.current
    }

    /// Feed the latest hit-test result.
    pub fn update(&mut self, hit: Option<CellId>) -> HoverTransition {
        if hit == self.current {
            return HoverTransition::default();
        }
        let transition = HoverTransition {
            left: self.current,
            entered: hit,
        };
        crate::trace!(
            left = ?transition.left,
            entered = ?transition.entered,
            "hover target changed"
        );
        self.current = hit;
        transition
    }

    /// Forget the hovered cell, emitting its `Left` if there was one.
    pub fn reset(&mut self) -> HoverTransition {
        self.update(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_cell_emits_nothing() {
        let mut hover = HoverTracker::new();
        assert_eq!(
            hover.update(Some(CellId(0))).events().collect::<Vec<_>>(),
            vec![PointerEvent::Entered(CellId(0))]
        );
        assert!(hover.update(Some(CellId(0))).is_empty());
    }

    #[test]
    fn switching_cells_leaves_before_entering() {
        let mut hover = HoverTracker::new();
        hover.update(Some(CellId(1)));
        let events: Vec<_> = hover.update(Some(CellId(2))).events().collect();
        assert_eq!(
            events,
            vec![
                PointerEvent::Left(CellId(1)),
                PointerEvent::Entered(CellId(2))
            ]
        );
        assert_eq!(hover.current(), Some(CellId(2)));
    }

    #[test]
    fn moving_off_the_strip_leaves() {
        let mut hover = HoverTracker::new();
        hover.update(Some(CellId(3)));
        let transition = hover.update(None);
        assert_eq!(transition.left, Some(CellId(3)));
        assert_eq!(transition.entered, None);
        assert!(hover.update(None).is_empty());
    }

    #[test]
    fn reset_reports_pending_leave_once() {
        let mut hover = HoverTracker::new();
        hover.update(Some(CellId(4)));
        assert_eq!(hover.reset().left, Some(CellId(4)));
        assert!(hover.reset().is_empty());
    }
}
