//! # dsloop-bitstream
//!
//! Turns one period of single-bit decisions into the frame the playback
//! firmware loops over.
//!
//! ## Frame Layout
//!
//! ```text
//! ┌────────┬─────────────────────────────────────┬─────────┐
//! │ byte 0 │ bytes 1..=28                        │ byte 29 │
//! ├────────┼─────────────────────────────────────┼─────────┤
//! │ length │ payload, last bit first, LSB first  │ copy of │
//! │ (bits) │ 8 bits per byte                     │ last    │
//! │        │                                     │ written │
//! └────────┴─────────────────────────────────────┴─────────┘
//! ```
//!
//! The firmware always reads byte 29 as the current byte when it wraps, so
//! the last byte holding payload bits is duplicated there. A full 232-bit
//! payload fills byte 29 itself.
//!
//! ## Example
//!
//! ```rust
//! use dsloop_bitstream::{pack, rotate_and_drop, BitSequence};
//!
//! let bits = BitSequence::from_bits(&[1, 1, 0, 1]);
//! let rotated = rotate_and_drop(&bits)?;
//! let frame = pack(&rotated)?;
//! assert_eq!(frame.as_bytes()[0], 3);
//! assert_eq!(frame.as_bytes()[1], 0b110);
//! # Ok::<(), dsloop_bitstream::FrameError>(())
//! ```

pub mod error;
pub mod frame;
pub mod rotate;
pub mod sequence;

pub use error::FrameError;
pub use frame::{encode_loop, pack, PackedFrame, FRAME_LEN, LOOP_BYTE_INDEX, MAX_FRAME_BITS};
pub use rotate::rotate_and_drop;
pub use sequence::BitSequence;
