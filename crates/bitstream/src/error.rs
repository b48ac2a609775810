//! Errors raised while aligning and packing a loop.
//!
//! # Error Codes
//!
//! | Code | Description |
//! |------|-------------|
//! | F001 | Sequence too short to rotate |
//! | F002 | No rotation boundary (alternating bits) |
//! | F003 | Payload exceeds the frame |

use thiserror::Error;

/// Failure to turn a bit sequence into a playable frame.
///
/// Every variant is terminal for a run: nothing is transmitted once one of
/// these is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    /// F001: rotation needs at least two bits to find a seam
    #[error("[F001] cannot rotate a sequence of {len} bit(s); at least 2 are required")]
    SequenceTooShort { len: usize },

    /// F002: every adjacent pair differs, including across the wrap
    #[error("[F002] no rotation boundary in {len} alternating bits")]
    NoRotationBoundary { len: usize },

    /// F003: more bits than the frame's payload bytes can hold
    #[error("[F003] {bits} bits exceed the {capacity}-bit frame payload")]
    BufferOverflow { bits: usize, capacity: usize },
}

impl FrameError {
    /// Get the error code string (e.g., "F001").
    pub fn code(&self) -> &'static str {
        match self {
            Self::SequenceTooShort { .. } => "F001",
            Self::NoRotationBoundary { .. } => "F002",
            Self::BufferOverflow { .. } => "F003",
        }
    }

    /// Get guidance on how to fix this error.
    pub fn guidance(&self) -> &'static str {
        match self {
            Self::SequenceTooShort { .. } => "Request at least 2 samples per period.",
            Self::NoRotationBoundary { .. } => {
                "The modulated stream toggles every sample, usually because the tone sits at \
                 half the sample rate. Choose a different sample count or feedback slope."
            }
            Self::BufferOverflow { .. } => {
                "Reduce the sample count so that one period fits in 29 payload bytes (at most \
                 233 samples before rotation)."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_code() {
        let err = FrameError::NoRotationBoundary { len: 4 };
        assert_eq!(err.code(), "F002");
        assert!(err.to_string().starts_with("[F002]"));
        assert!(err.to_string().contains("4 alternating bits"));
    }

    #[test]
    fn test_overflow_message() {
        let err = FrameError::BufferOverflow {
            bits: 240,
            capacity: 232,
        };
        assert_eq!(
            err.to_string(),
            "[F003] 240 bits exceed the 232-bit frame payload"
        );
        assert!(!err.guidance().is_empty());
    }
}
