#![forbid(unsafe_code)]

//! Pointer input addressed to individual character cells.

use std::fmt;

/// Position of a character cell within its surface, in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub usize);

impl CellId {
    /// Index of the cell in its surface.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell#{}", self.0)
    }
}

/// Pointer signal delivered to one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEvent {
    /// The pointer moved onto the cell.
    Entered(CellId),
    /// The pointer moved off the cell.
    Left(CellId),
}

impl PointerEvent {
    /// The cell this event is addressed to.
    #[inline]
    #[must_use]
    pub const fn cell(self) -> CellId {
        match self {
            Self::Entered(id) | Self::Left(id) => id,
        }
    }
}
