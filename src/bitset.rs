//! Presence set over the 256 possible byte values.
//!
//! The partitioning passes record every byte value they see here, so that only the
//! populated buckets are visited afterwards instead of scanning all 256 counters.

use cuneiform::cuneiform;

const WORDS: usize = 4;

/// A 256-bit set, one bit per byte value.
///
/// Iteration yields the present byte values in ascending order.
#[cuneiform]
pub(crate) struct PresenceSet {
    words: [u64; WORDS],
}

impl PresenceSet {
    pub(crate) fn new() -> Self {
        Self { words: [0; WORDS] }
    }

    /// Marks `byte` as present.
    #[inline(always)]
    pub(crate) fn insert(&mut self, byte: u8) {
        self.words[(byte >> 6) as usize] |= 1 << (byte & 63);
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, byte: u8) -> bool {
        self.words[(byte >> 6) as usize] & (1 << (byte & 63)) != 0
    }

    /// Number of present byte values.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Ascending iterator over the present byte values.
    pub(crate) fn iter(&self) -> Iter {
        Iter {
            words: self.words,
            word: 0,
        }
    }
}

/// Iterator over a snapshot of a [`PresenceSet`].
///
/// Each step finds the lowest set bit of the current word and clears it locally.
pub(crate) struct Iter {
    words: [u64; WORDS],
    word: usize,
}

impl Iterator for Iter {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        while self.word < WORDS {
            let bits = self.words[self.word];
            if bits != 0 {
                self.words[self.word] = bits & (bits - 1);
                return Some((self.word * 64) as u8 + bits.trailing_zeros() as u8);
            }
            self.word += 1;
        }
        None
    }
}
