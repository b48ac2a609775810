//! Run configuration.

use dsloop_bitstream::MAX_FRAME_BITS;
use std::time::Duration;
use thiserror::Error;

/// Default number of samples in one loop period.
pub const DEFAULT_SAMPLE_COUNT: usize = 160;

/// Fewest samples a period may have: rotation needs a seam to cut.
pub const MIN_SAMPLE_COUNT: usize = 2;

/// Most samples a period may have: one is dropped by rotation, the rest must fit the frame.
pub const MAX_SAMPLE_COUNT: usize = MAX_FRAME_BITS + 1;

/// Read slice used while waiting indefinitely on a serial port.
pub const INDEFINITE_POLL: Duration = Duration::from_secs(1);

/// Rejected command-line values.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("sample count {got} is out of range ({min}..={max})")]
    SampleCount { got: usize, min: usize, max: usize },

    #[error("CPU clock must be non-zero")]
    CpuClock,

    #[error("feedback slope must be positive and finite, got {0}")]
    Slope(f64),

    #[error("handshake timeout must be at least 1 ms")]
    ZeroTimeout,
}

/// Validated parameters for one modulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    /// Samples per loop period (`N`).
    pub samples: usize,
    /// Playback CPU clock in Hz.
    pub cpu_clock_hz: u64,
    /// Feedback step of the modulator.
    pub slope: f64,
}

impl RunConfig {
    /// Validate and collect run parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `samples` is outside
    /// [`MIN_SAMPLE_COUNT`]..=[`MAX_SAMPLE_COUNT`], `cpu_clock_hz` is zero, or
    /// `slope` is not a positive finite number.
    pub fn new(samples: usize, cpu_clock_hz: u64, slope: f64) -> Result<Self, ConfigError> {
        if !(MIN_SAMPLE_COUNT..=MAX_SAMPLE_COUNT).contains(&samples) {
            return Err(ConfigError::SampleCount {
                got: samples,
                min: MIN_SAMPLE_COUNT,
                max: MAX_SAMPLE_COUNT,
            });
        }
        if cpu_clock_hz == 0 {
            return Err(ConfigError::CpuClock);
        }
        if !(slope.is_finite() && slope > 0.0) {
            return Err(ConfigError::Slope(slope));
        }

        Ok(Self {
            samples,
            cpu_clock_hz,
            slope,
        })
    }
}

/// How long a handshake read may block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeoutPolicy {
    /// Wait for the device forever. The firmware only answers once it is
    /// ready, so this is the default.
    #[default]
    Indefinite,

    /// Give up on a handshake byte after this long.
    After(Duration),
}

impl TimeoutPolicy {
    /// Build a policy from an optional millisecond count.
    ///
    /// # Errors
    ///
    /// A zero count is rejected: the port would time out before the device
    /// could ever answer.
    pub fn from_millis(millis: Option<u64>) -> Result<Self, ConfigError> {
        match millis {
            Some(0) => Err(ConfigError::ZeroTimeout),
            Some(ms) => Ok(Self::After(Duration::from_millis(ms))),
            None => Ok(Self::Indefinite),
        }
    }

    /// Timeout to configure on the underlying port for each read attempt.
    pub fn read_timeout(&self) -> Duration {
        match self {
            Self::Indefinite => INDEFINITE_POLL,
            Self::After(timeout) => *timeout,
        }
    }
}
