#![no_std]

//! # dsloop Modulation
//!
//! No-std pulse-density modulation for single-bit playback loops.
//!
//! - [`SignalSource`] - A continuous amplitude as a function of time
//! - [`Sine`] - The sine generator driving the playback loop
//! - [`DeltaSigmaModulator`] - First-order feedback quantizer producing [`Sample`]s
//! - [`quantize`] - The single-bit decision rule
//!
//! The modulator never runs on its own: every step is an explicit
//! [`DeltaSigmaModulator::advance`], so the caller always bounds how many
//! samples are produced.
//!
//! # Example
//!
//! ```
//! use dsloop_modulation::{DeltaSigmaModulator, Sine, DEFAULT_FEEDBACK_SLOPE};
//! use dsloop_timing::SampleClock;
//!
//! let clock = SampleClock::new(16_000_000.0);
//! let sine = Sine::new(clock.loop_frequency(160));
//! let mut modulator =
//!     DeltaSigmaModulator::with_clock(sine, DEFAULT_FEEDBACK_SLOPE, &clock).unwrap();
//!
//! let ones = modulator.run(160).filter(|s| s.decision.bit() == 1).count();
//! assert!(ones > 0 && ones < 160);
//! ```

mod modulator;
mod signal;

pub use modulator::{quantize, Decision, DeltaSigmaModulator, ModulatorConfigError, Sample};
pub use signal::{SignalSource, Sine};

/// Default feedback step added to the accumulator per decision.
pub const DEFAULT_FEEDBACK_SLOPE: f64 = 0.05;
