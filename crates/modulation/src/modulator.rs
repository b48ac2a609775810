//! First-order delta-sigma modulator.

use crate::signal::SignalSource;
use dsloop_timing::SampleClock;
use thiserror::Error;

/// Single-bit quantizer output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Decision {
    /// Pulse high (+1). Bit value 1.
    #[default]
    Positive,

    /// Pulse low (-1). Bit value 0.
    Negative,
}

impl Decision {
    /// Signed value of the decision: +1 or -1.
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Decision::Positive => 1,
            Decision::Negative => -1,
        }
    }

    /// Playback bit: 1 for a positive decision, 0 otherwise.
    #[inline]
    pub fn bit(self) -> u8 {
        match self {
            Decision::Positive => 1,
            Decision::Negative => 0,
        }
    }
}

/// Decide the next bit from the command and the accumulated feedback.
///
/// Returns [`Decision::Positive`] when `command - feedback >= 0`, so an exact
/// tie resolves high.
#[inline]
pub fn quantize(command: f64, feedback: f64) -> Decision {
    let error = command - feedback;
    if error >= 0.0 {
        Decision::Positive
    } else {
        Decision::Negative
    }
}

/// One modulation step.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Sample {
    /// Signal amplitude at this step.
    pub command: f64,
    /// Feedback accumulator before this step's update.
    pub feedback: f64,
    /// Quantizer output.
    pub decision: Decision,
}

/// Rejected modulator parameters.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ModulatorConfigError {
    #[error("feedback slope must be positive and finite, got {0}")]
    InvalidSlope(f64),

    #[error("sample interval must be positive and finite, got {0}")]
    InvalidInterval(f64),
}

/// First-order delta-sigma modulator.
///
/// Each [`advance`](Self::advance) samples the source at `index · interval`,
/// quantizes the difference against the feedback accumulator and then moves
/// the accumulator one `slope` step toward the decision. The modulator owns
/// its only state (`feedback` and `index`) exclusively; two modulators built
/// from the same parameters produce identical sequences.
///
/// There is no end to the sequence. Callers bound consumption themselves,
/// either by calling `advance` a fixed number of times, with
/// [`run`](Self::run), or by filling a block with
/// [`generate_block`](Self::generate_block).
///
/// # Example
///
/// ```
/// use dsloop_modulation::{Decision, DeltaSigmaModulator};
///
/// // A constant zero command toggles around the accumulator
/// let mut modulator = DeltaSigmaModulator::new(|_t: f64| 0.0, 0.5, 1e-3).unwrap();
/// assert_eq!(modulator.advance().decision, Decision::Positive);
/// assert_eq!(modulator.advance().decision, Decision::Negative);
/// assert_eq!(modulator.advance().decision, Decision::Positive);
/// ```
#[derive(Clone, Debug)]
pub struct DeltaSigmaModulator<S> {
    // ─────────────────────────────────────────────────────────────────────
    // Configuration
    // ─────────────────────────────────────────────────────────────────────
    source: S,
    slope: f64,
    interval: f64,

    // ─────────────────────────────────────────────────────────────────────
    // Runtime state
    // ─────────────────────────────────────────────────────────────────────
    feedback: f64,
    index: u64,
}

impl<S: SignalSource> DeltaSigmaModulator<S> {
    /// Create a modulator sampling `source` every `interval` seconds.
    ///
    /// # Errors
    /// Returns an error if `slope` or `interval` is not a positive finite number.
    pub fn new(source: S, slope: f64, interval: f64) -> Result<Self, ModulatorConfigError> {
        if !(slope.is_finite() && slope > 0.0) {
            return Err(ModulatorConfigError::InvalidSlope(slope));
        }
        if !(interval.is_finite() && interval > 0.0) {
            return Err(ModulatorConfigError::InvalidInterval(interval));
        }

        Ok(Self {
            source,
            slope,
            interval,
            feedback: 0.0,
            index: 0,
        })
    }

    /// Create a modulator stepping at the interval of `clock`.
    pub fn with_clock(
        source: S,
        slope: f64,
        clock: &SampleClock,
    ) -> Result<Self, ModulatorConfigError> {
        Self::new(source, slope, clock.interval())
    }

    /// Produce the next sample and update the feedback accumulator.
    #[inline]
    pub fn advance(&mut self) -> Sample {
        let command = self.source.evaluate(self.interval * self.index as f64);
        let decision = quantize(command, self.feedback);
        let sample = Sample {
            command,
            feedback: self.feedback,
            decision,
        };

        self.index += 1;
        self.feedback += self.slope * f64::from(decision.sign());
        sample
    }

    /// Fill `output` with consecutive samples.
    pub fn generate_block(&mut self, output: &mut [Sample]) {
        for slot in output.iter_mut() {
            *slot = self.advance();
        }
    }

    /// Iterate over exactly `count` further samples.
    pub fn run(&mut self, count: usize) -> impl Iterator<Item = Sample> + '_ {
        (0..count).map(move |_| self.advance())
    }

    /// Return to step 0 with an empty accumulator.
    pub fn reset(&mut self) {
        self.feedback = 0.0;
        self.index = 0;
    }

    /// Current feedback accumulator.
    #[inline]
    pub fn feedback(&self) -> f64 {
        self.feedback
    }

    /// Index of the next step.
    #[inline]
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Feedback step per decision.
    #[inline]
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Seconds between steps.
    #[inline]
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// The signal being modulated.
    pub fn source(&self) -> &S {
        &self.source
    }
}
