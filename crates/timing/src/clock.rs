//! Sample clock derived from the playback CPU frequency.

use crate::CLOCKS_PER_SAMPLE;

/// Timing context for one modulation run.
///
/// Converts between step indices, seconds, and the frequency of a waveform
/// whose period spans a whole number of samples.
///
/// # Example
///
/// ```
/// use dsloop_timing::SampleClock;
///
/// let clock = SampleClock::new(8_000_000.0);
/// assert_eq!(clock.sample_rate(), 4_000_000.0);
/// assert_eq!(clock.step_time(4), 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleClock {
    /// CPU clock in Hz
    cpu_clock_hz: f64,
    /// Seconds between two emitted bits
    interval: f64,
}

impl SampleClock {
    /// Create a clock for a CPU running at `cpu_clock_hz`.
    ///
    /// # Panics
    /// Panics if `cpu_clock_hz` is not a positive finite number.
    pub fn new(cpu_clock_hz: f64) -> Self {
        assert!(
            cpu_clock_hz.is_finite() && cpu_clock_hz > 0.0,
            "CPU clock must be positive"
        );
        Self {
            cpu_clock_hz,
            interval: CLOCKS_PER_SAMPLE / cpu_clock_hz,
        }
    }

    /// CPU clock in Hz.
    #[inline]
    pub fn cpu_clock_hz(&self) -> f64 {
        self.cpu_clock_hz
    }

    /// Seconds between two consecutive samples (`Δt`).
    #[inline]
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Samples emitted per second.
    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.cpu_clock_hz / CLOCKS_PER_SAMPLE
    }

    /// Time in seconds of modulation step `index`.
    #[inline]
    pub fn step_time(&self, index: u64) -> f64 {
        self.interval * index as f64
    }

    /// Frequency of a waveform whose single period spans `samples` steps.
    ///
    /// # Panics
    /// Panics if `samples` is zero.
    #[inline]
    pub fn loop_frequency(&self, samples: usize) -> f64 {
        assert!(samples > 0, "Loop must contain at least one sample");
        1.0 / (samples as f64 * self.interval)
    }

    /// Number of whole samples in one period of `frequency` Hz (rounded).
    #[inline]
    pub fn samples_per_period(&self, frequency: f64) -> u64 {
        libm::round(self.sample_rate() / frequency) as u64
    }
}
