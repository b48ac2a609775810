//! Continuous signal sources.

use core::f64::consts::TAU;

/// A continuous amplitude as a function of time.
///
/// Implementors must be pure: evaluating the same `t` twice returns the
/// same amplitude. Any `Fn(f64) -> f64` closure is a signal source, which
/// keeps tests free to drive the modulator with hand-picked amplitudes.
pub trait SignalSource {
    /// Amplitude at time `t` (seconds).
    fn evaluate(&self, t: f64) -> f64;
}

impl<F> SignalSource for F
where
    F: Fn(f64) -> f64,
{
    #[inline]
    fn evaluate(&self, t: f64) -> f64 {
        self(t)
    }
}

/// Unit-amplitude sine wave.
///
/// Output: `sin(2π · t · frequency)`, starting at zero phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sine {
    frequency: f64,
}

impl Sine {
    /// Create a sine at `frequency` Hz.
    pub fn new(frequency: f64) -> Self {
        Self { frequency }
    }

    /// Frequency in Hz.
    #[inline]
    pub fn frequency(&self) -> f64 {
        self.frequency
    }
}

impl SignalSource for Sine {
    #[inline]
    fn evaluate(&self, t: f64) -> f64 {
        libm::sin(TAU * t * self.frequency)
    }
}
