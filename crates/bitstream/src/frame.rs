//! Fixed-size playback frame.
//!
//! The firmware receives exactly [`FRAME_LEN`] bytes, no more and no less, so
//! the frame is a plain array rather than a growable buffer.

use crate::error::FrameError;
use crate::rotate::rotate_and_drop;
use crate::sequence::BitSequence;
use std::fmt;

/// Bytes in a frame on the wire.
pub const FRAME_LEN: usize = 30;

/// Index the firmware reads as the current byte when the loop wraps.
pub const LOOP_BYTE_INDEX: usize = FRAME_LEN - 1;

/// First payload byte (byte 0 is the length header).
const PAYLOAD_START: usize = 1;

/// Largest payload, in bits, that fits bytes 1..=29.
pub const MAX_FRAME_BITS: usize = (FRAME_LEN - PAYLOAD_START) * 8;

/// A packed 30-byte loop frame.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedFrame {
    bytes: [u8; FRAME_LEN],
}

impl PackedFrame {
    /// Raw frame bytes, as written to the wire.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.bytes
    }

    /// Number of payload bits, from the header byte.
    #[inline]
    pub fn bit_len(&self) -> usize {
        self.bytes[0] as usize
    }

    /// Payload bytes including the loop byte.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.bytes[PAYLOAD_START..]
    }

    /// Index of the last byte holding payload bits.
    pub fn last_written_index(&self) -> usize {
        PAYLOAD_START + self.bit_len().saturating_sub(1) / 8
    }

    /// Recover the packed bits in their original order.
    pub fn to_sequence(&self) -> BitSequence {
        let len = self.bit_len();
        let mut reversed = Vec::with_capacity(len);
        for n in 0..len {
            let byte = self.bytes[PAYLOAD_START + n / 8];
            reversed.push((byte >> (n % 8)) & 1);
        }
        reversed.reverse();
        BitSequence::from_vec(reversed)
    }

    /// Lowercase hex rendering of all 30 bytes.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Debug for PackedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackedFrame")
            .field("bit_len", &self.bit_len())
            .field("bytes", &self.to_hex())
            .finish()
    }
}

impl AsRef<[u8]> for PackedFrame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Pack a bit sequence into a frame.
///
/// Byte 0 holds the bit count. Bits are taken from the end of the sequence
/// backwards and OR'ed into bytes 1, 2, ... starting at the least significant
/// bit. The last byte written is then copied into [`LOOP_BYTE_INDEX`].
///
/// # Errors
///
/// Returns [`FrameError::BufferOverflow`] if the sequence holds more than
/// [`MAX_FRAME_BITS`] bits.
///
/// # Example
///
/// ```
/// use dsloop_bitstream::{pack, BitSequence};
///
/// let frame = pack(&BitSequence::from_bits(&[1, 1, 0, 1])).unwrap();
/// assert_eq!(frame.as_bytes()[0], 4);
/// assert_eq!(frame.as_bytes()[1], 0b1101);
/// assert_eq!(frame.as_bytes()[29], 0b1101);
/// ```
pub fn pack(bits: &BitSequence) -> Result<PackedFrame, FrameError> {
    let len = bits.len();
    if len > MAX_FRAME_BITS {
        return Err(FrameError::BufferOverflow {
            bits: len,
            capacity: MAX_FRAME_BITS,
        });
    }

    let mut bytes = [0u8; FRAME_LEN];
    bytes[0] = len as u8;

    let mut index = PAYLOAD_START;
    let mut shift = 0;
    for bit in bits.iter().rev() {
        if shift > 7 {
            shift = 0;
            index += 1;
        }
        bytes[index] |= bit << shift;
        shift += 1;
    }

    bytes[LOOP_BYTE_INDEX] = bytes[index];
    tracing::debug!(bits = len, last = index, "packed loop frame");

    Ok(PackedFrame { bytes })
}

/// Align one modulated period and pack it.
///
/// Runs [`rotate_and_drop`] followed by [`pack`]; the frame header therefore
/// reports one bit fewer than `period` holds.
pub fn encode_loop(period: &BitSequence) -> Result<PackedFrame, FrameError> {
    let rotated = rotate_and_drop(period)?;
    pack(&rotated)
}
