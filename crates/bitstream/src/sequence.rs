//! Ordered single-bit sequences.

use dsloop_modulation::{Decision, Sample};
use std::fmt;
use std::ops::Index;

/// An ordered sequence of playback bits.
///
/// The length is fixed once built. Bits are stored as `0`/`1` bytes so that
/// slices read naturally in tests and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitSequence {
    bits: Vec<u8>,
}

impl BitSequence {
    /// Build a sequence from bit values. Any non-zero value is a 1 bit.
    pub fn from_bits(bits: &[u8]) -> Self {
        Self {
            bits: bits.iter().map(|&b| u8::from(b != 0)).collect(),
        }
    }

    /// Build a sequence from modulator samples (1 for a positive decision).
    pub fn from_samples(samples: &[Sample]) -> Self {
        samples.iter().map(|s| s.decision).collect()
    }

    pub(crate) fn from_vec(bits: Vec<u8>) -> Self {
        debug_assert!(bits.iter().all(|&b| b <= 1));
        Self { bits }
    }

    /// Number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// `true` if the sequence holds no bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bits as `0`/`1` values.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    /// Iterate over the bits in order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = u8> + ExactSizeIterator + '_ {
        self.bits.iter().copied()
    }

    /// Number of 1 bits.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b == 1).count()
    }
}

impl Index<usize> for BitSequence {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.bits[index]
    }
}

impl FromIterator<Decision> for BitSequence {
    fn from_iter<I: IntoIterator<Item = Decision>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().map(Decision::bit).collect(),
        }
    }
}

impl FromIterator<bool> for BitSequence {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().map(u8::from).collect(),
        }
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            write!(f, "{bit}")?;
        }
        Ok(())
    }
}
