#![forbid(unsafe_code)]

//! The glyph set scrambled cells draw from.

use rand::Rng;

/// A fixed, non-empty set of glyphs to draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alphabet {
    glyphs: &'static [char],
}

const STANDARD_GLYPHS: [char; 36] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

impl Alphabet {
    /// Uppercase Latin letters followed by the ten digits.
    pub const STANDARD: Self = Self {
        glyphs: &STANDARD_GLYPHS,
    };

    /// Build an alphabet from a static glyph list. Returns `None` when the
    /// list is empty.
    #[must_use]
    pub const fn new(glyphs: &'static [char]) -> Option<Self> {
        if glyphs.is_empty() {
            None
        } else {
            Some(Self { glyphs })
        }
    }

    /// Glyphs in draw order.
    #[inline]
    #[must_use]
    pub const fn glyphs(&self) -> &'static [char] {
        self.glyphs
    }

    /// Number of glyphs.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always `false`; an alphabet cannot be constructed empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Whether `c` belongs to this alphabet.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.glyphs.contains(&c)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Draw one glyph uniformly at random.
///
/// All randomness comes from `rng`; the same seeded generator state always
/// yields the same glyph.
pub fn pick_random<R: Rng + ?Sized>(alphabet: &Alphabet, rng: &mut R) -> char {
    alphabet.glyphs[rng.gen_range(0..alphabet.glyphs.len())]
}
