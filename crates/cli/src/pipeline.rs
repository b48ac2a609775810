//! Modulate one sine period and turn it into an uploadable frame.
//!
//! The work is split in two so the modulation trace can be reported before
//! alignment, which is the step that may reject the period.

use crate::config::RunConfig;
use anyhow::{Context, Result};
use dsloop_bitstream::{pack, rotate_and_drop, BitSequence, PackedFrame};
use dsloop_modulation::{DeltaSigmaModulator, Sample, Sine};
use dsloop_timing::SampleClock;

/// One modulated sine period.
#[derive(Debug, Clone)]
pub struct ModulatedPeriod {
    /// Sample clock derived from the CPU frequency.
    pub clock: SampleClock,
    /// Sine frequency whose period spans exactly `samples.len()` steps.
    pub frequency: f64,
    /// Every modulation step of the period.
    pub samples: Vec<Sample>,
    /// Bits of the period before alignment.
    pub bits: BitSequence,
}

/// A period aligned for seamless playback and packed for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedLoop {
    /// Aligned loop (one bit shorter than the period).
    pub bits: BitSequence,
    /// Frame to send.
    pub frame: PackedFrame,
}

/// Run the sine through the modulator for exactly `config.samples` steps.
///
/// # Errors
///
/// Fails if the modulator rejects its parameters.
pub fn modulate_period(config: &RunConfig) -> Result<ModulatedPeriod> {
    let clock = SampleClock::new(config.cpu_clock_hz as f64);
    let frequency = clock.loop_frequency(config.samples);

    let mut modulator = DeltaSigmaModulator::with_clock(Sine::new(frequency), config.slope, &clock)
        .context("Failed to configure modulator")?;
    let mut samples = vec![Sample::default(); config.samples];
    modulator.generate_block(&mut samples);

    let bits = BitSequence::from_samples(&samples);
    tracing::debug!(
        samples = bits.len(),
        ones = bits.count_ones(),
        "modulated one period"
    );

    Ok(ModulatedPeriod {
        clock,
        frequency,
        samples,
        bits,
    })
}

/// Rotate the period onto a seam and pack the result into a frame.
///
/// # Errors
///
/// Fails if the period has no rotation boundary or the aligned loop does not
/// fit the frame.
pub fn align_loop(period: &ModulatedPeriod) -> Result<AlignedLoop> {
    let bits = rotate_and_drop(&period.bits).context("Failed to align loop for playback")?;
    let frame = pack(&bits).context("Failed to pack loop frame")?;
    Ok(AlignedLoop { bits, frame })
}
