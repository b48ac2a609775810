#![no_std]

//! # dsloop Timing
//!
//! No-std timing for the pulse-density playback loop.
//!
//! The playback firmware emits one bit every [`CLOCKS_PER_SAMPLE`] CPU cycles,
//! so the sample interval of the modulated stream is derived from the
//! microcontroller's clock rather than from an audio sample rate.
//!
//! - [`SampleClock`] - CPU clock to sample interval, loop frequency and step times
//!
//! # Example
//!
//! ```
//! use dsloop_timing::SampleClock;
//!
//! let clock = SampleClock::new(16_000_000.0);
//! assert_eq!(clock.interval(), 1.25e-7);
//!
//! // 160 samples cover exactly one period of a 50 kHz tone
//! assert!((clock.loop_frequency(160) - 50_000.0).abs() < 1e-6);
//! ```

mod clock;

pub use clock::SampleClock;

/// CPU cycles spent on each emitted bit by the playback loop.
pub const CLOCKS_PER_SAMPLE: f64 = 2.0;

/// Default CPU clock in Hz (16 MHz AVR).
pub const DEFAULT_CPU_CLOCK_HZ: u64 = 16_000_000;
