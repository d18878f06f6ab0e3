#![forbid(unsafe_code)]

//! Column hit-testing for a single row of cells.

use glyphflip_core::event::CellId;

use crate::segment::CharCell;

/// Total columns the strip occupies.
#[must_use]
pub fn strip_width(cells: &[CharCell]) -> usize {
    cells.iter().map(CharCell::width).sum()
}

/// Cell covering terminal column `column` when the strip starts at `origin`.
///
/// Wide glyphs claim every column they cover.
#[must_use]
pub fn cell_at_column(cells: &[CharCell], origin: u16, column: u16) -> Option<CellId> {
    let offset = usize::from(column.checked_sub(origin)?);
    let mut start = 0usize;
    for (idx, cell) in cells.iter().enumerate() {
        let end = start + cell.width();
        if offset < end {
            return Some(CellId(idx));
        }
        start = end;
    }
    None
}
