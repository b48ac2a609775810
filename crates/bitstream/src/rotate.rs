//! Loop alignment ("rotate and drop").
//!
//! One period of `N` modulated bits is replayed circularly by the firmware,
//! which also repeats the final byte once per wrap. Dropping exactly one bit
//! at a seam where two neighbours are equal keeps the looped waveform free of
//! a glitch caused by where sampling happened to start.

use crate::error::FrameError;
use crate::sequence::BitSequence;

/// Align a period for circular playback and drop one bit.
///
/// - If the first and last bits are equal the wrap is already clean and the
///   last bit is dropped.
/// - Otherwise the sequence is rotated to start right after the first pair of
///   equal neighbours `bits[i-1] == bits[i]`, and `bits[i-1]` is dropped:
///   the result is `bits[i..] ++ bits[..i-1]`.
///
/// The output is always exactly one bit shorter than the input.
///
/// # Errors
///
/// - [`FrameError::SequenceTooShort`] for fewer than 2 bits
/// - [`FrameError::NoRotationBoundary`] when every neighbour pair differs
///
/// # Example
///
/// ```
/// use dsloop_bitstream::{rotate_and_drop, BitSequence};
///
/// let bits = BitSequence::from_bits(&[1, 0, 0, 1, 0]);
/// let rotated = rotate_and_drop(&bits).unwrap();
/// assert_eq!(rotated.as_slice(), &[0, 1, 0, 1]);
/// ```
pub fn rotate_and_drop(bits: &BitSequence) -> Result<BitSequence, FrameError> {
    let bits = bits.as_slice();
    let len = bits.len();
    if len < 2 {
        return Err(FrameError::SequenceTooShort { len });
    }

    if bits[0] == bits[len - 1] {
        tracing::debug!(len, "loop already closes cleanly, dropping last bit");
        return Ok(BitSequence::from_vec(bits[..len - 1].to_vec()));
    }

    let boundary = (1..len)
        .find(|&i| bits[i - 1] == bits[i])
        .ok_or(FrameError::NoRotationBoundary { len })?;
    tracing::debug!(len, boundary, "rotating loop to repeated pair");

    let mut rotated = Vec::with_capacity(len - 1);
    rotated.extend_from_slice(&bits[boundary..]);
    rotated.extend_from_slice(&bits[..boundary - 1]);
    Ok(BitSequence::from_vec(rotated))
}
