#![forbid(unsafe_code)]

//! Character cells and the text segmenter.
//!
//! The segmenter splits source text into one [`CharCell`] per Unicode scalar
//! value, in source order. Whitespace and punctuation become cells like any
//! other character; deciding what scrambles is the controller's business.

use unicode_width::UnicodeWidthChar;

/// One displayed character and the glyph it settles back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharCell {
    original: char,
    displayed: char,
}

impl CharCell {
    /// Create a cell showing its original glyph.
    #[must_use]
    pub const fn new(original: char) -> Self {
        Self {
            original,
            displayed: original,
        }
    }

    /// The glyph this cell was segmented from.
    #[inline]
    #[must_use]
    pub const fn original(&self) -> char {
        self.original
    }

    /// The glyph currently shown.
    #[inline]
    #[must_use]
    pub const fn displayed(&self) -> char {
        self.displayed
    }

    /// Show `glyph` instead of the original.
    #[inline]
    pub fn set_displayed(&mut self, glyph: char) {
        self.displayed = glyph;
    }

    /// Show the original glyph again.
    #[inline]
    pub fn restore(&mut self) {
        self.displayed = self.original;
    }

    /// Whether the displayed glyph is the original one.
    #[inline]
    #[must_use]
    pub const fn is_restored(&self) -> bool {
        self.displayed == self.original
    }

    /// Whether the original glyph is blank (see [`is_blank`]).
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        is_blank(self.original)
    }

    /// Terminal columns the original glyph occupies, at least 1.
    ///
    /// Control and zero-width characters still get one column so every
    /// cell stays addressable by the pointer.
    #[must_use]
    pub fn width(&self) -> usize {
        self.original.width().unwrap_or(0).max(1)
    }
}

/// Whether `c` trims away to nothing: Unicode `White_Space` or the
/// zero-width no-break space.
#[inline]
#[must_use]
pub fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Destination for segmented cells.
pub trait CellSink {
    /// Remove every cell.
    fn clear(&mut self);

    /// Append a cell after the existing ones.
    fn push(&mut self, cell: CharCell);
}

impl CellSink for Vec<CharCell> {
    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn push(&mut self, cell: CharCell) {
        Vec::push(self, cell);
    }
}

/// Split `source` into one cell per scalar value.
#[must_use]
pub fn segment(source: &str) -> Vec<CharCell> {
    source.chars().map(CharCell::new).collect()
}

/// Replace the contents of `sink` with the cells of `source`.
///
/// Returns the number of cells written.
pub fn segment_into<S: CellSink + ?Sized>(sink: &mut S, source: &str) -> usize {
    sink.clear();
    let mut count = 0;
    for c in source.chars() {
        sink.push(CharCell::new(c));
        count += 1;
    }
    tracing::trace!(cells = count, "segmented source text");
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_in_source_order() {
        let cells = segment("AB C");
        let originals: Vec<char> = cells.iter().map(CharCell::original).collect();
        assert_eq!(originals, vec!['A', 'B', ' ', 'C']);
        assert!(cells.iter().all(CharCell::is_restored));
    }

    #[test]
    fn empty_source_yields_no_cells() {
        assert!(segment("").is_empty());
    }

    #[test]
    fn segments_by_scalar_value_not_grapheme() {
        // 'e' + combining acute accent is one grapheme but two scalars.
        let cells = segment("e\u{301}");
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[1].original(), '\u{301}');
    }

    #[test]
    fn segment_into_replaces_prior_content() {
        let mut sink = segment("stale");
        let written = segment_into(&mut sink, "Hi!");
        assert_eq!(written, 3);
        assert_eq!(sink, segment("Hi!"));
    }

    #[test]
    fn blank_detection_matches_trim() {
        for c in [' ', '\t', '\n', '\u{00A0}', '\u{3000}', '\u{FEFF}'] {
            assert!(is_blank(c), "{c:?} should be blank");
        }
        for c in ['A', '.', '-', '\u{200B}'] {
            assert!(!is_blank(c), "{c:?} should not be blank");
        }
    }

    #[test]
    fn restore_returns_to_original() {
        let mut cell = CharCell::new('Q');
        cell.set_displayed('7');
        assert!(!cell.is_restored());
        cell.restore();
        assert_eq!(cell.displayed(), 'Q');
    }

    #[test]
    fn width_counts_wide_glyphs() {
        assert_eq!(CharCell::new('A').width(), 1);
        assert_eq!(CharCell::new('名').width(), 2);
        assert_eq!(CharCell::new('\u{301}').width(), 1);
    }
}
