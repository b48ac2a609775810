//! End-to-end tests: modulated period -> aligned loop -> packed frame.

use dsloop_bitstream::{
    encode_loop, pack, rotate_and_drop, BitSequence, FrameError, FRAME_LEN, LOOP_BYTE_INDEX,
    MAX_FRAME_BITS,
};
use dsloop_modulation::{DeltaSigmaModulator, Sample, Sine, DEFAULT_FEEDBACK_SLOPE};
use dsloop_timing::SampleClock;

/// Modulate one period of the loop sine at the default clock and slope.
fn modulate_period(samples: usize) -> Vec<Sample> {
    let clock = SampleClock::new(16_000_000.0);
    let sine = Sine::new(clock.loop_frequency(samples));
    let mut modulator =
        DeltaSigmaModulator::with_clock(sine, DEFAULT_FEEDBACK_SLOPE, &clock).unwrap();
    modulator.run(samples).collect()
}

#[test]
fn test_rotate_drops_last_when_endpoints_match() {
    let bits = BitSequence::from_bits(&[0, 0, 1, 1, 0]);
    let rotated = rotate_and_drop(&bits).unwrap();
    assert_eq!(rotated.as_slice(), &[0, 0, 1, 1]);
}

#[test]
fn test_alternating_sequence_fails() {
    let bits = BitSequence::from_bits(&[0, 1, 0, 1]);
    let err = rotate_and_drop(&bits).unwrap_err();
    assert_eq!(err, FrameError::NoRotationBoundary { len: 4 });
    assert_eq!(err.code(), "F002");
}

#[test]
fn test_pack_header_payload_and_loop_byte() {
    let frame = pack(&BitSequence::from_bits(&[1, 1, 0, 1])).unwrap();
    let mut expected = [0u8; FRAME_LEN];
    expected[0] = 4;
    expected[1] = 0b0000_1101;
    expected[LOOP_BYTE_INDEX] = 0b0000_1101;
    assert_eq!(frame.as_bytes(), &expected);
}

#[test]
fn test_scripted_decisions_end_to_end() {
    // Decisions +1 +1 -1 +1 -> bits 1101 -> 110 -> header 3, byte 0b110
    let clock = SampleClock::new(16_000_000.0);
    let interval = clock.interval();
    let levels = [0.0, 1.0, -1.0, 1.0];
    let source = move |t: f64| levels[(t / interval).round() as usize];
    let mut modulator = DeltaSigmaModulator::with_clock(source, 0.05, &clock).unwrap();

    let bits: BitSequence = modulator.run(4).map(|s| s.decision).collect();
    assert_eq!(bits.as_slice(), &[1, 1, 0, 1]);

    let frame = encode_loop(&bits).unwrap();
    assert_eq!(frame.as_bytes()[0], 3);
    assert_eq!(frame.as_bytes()[1], 6);
    assert_eq!(frame.as_bytes()[LOOP_BYTE_INDEX], 6);
    assert!(frame.as_bytes()[2..LOOP_BYTE_INDEX].iter().all(|&b| b == 0));
}

#[test]
fn test_four_sample_sine_rotates_at_leading_pair() {
    // 1100: endpoints differ, first pair at (0, 1) -> 100, packed last bit first
    let bits = BitSequence::from_samples(&modulate_period(4));
    assert_eq!(bits.as_slice(), &[1, 1, 0, 0]);
    let frame = encode_loop(&bits).unwrap();
    assert_eq!(frame.bit_len(), 3);
    assert_eq!(frame.as_bytes()[1], 0b100);
}

#[test]
fn test_two_sample_sine_has_no_boundary() {
    // One sample at 0 (tie, high) and one at π (below feedback, low)
    let bits = BitSequence::from_samples(&modulate_period(2));
    assert_eq!(bits.as_slice(), &[1, 0]);
    assert_eq!(
        encode_loop(&bits).unwrap_err(),
        FrameError::NoRotationBoundary { len: 2 }
    );
}

#[test]
fn test_default_run_fits_frame() {
    let bits = BitSequence::from_samples(&modulate_period(160));
    let frame = encode_loop(&bits).unwrap();
    assert_eq!(frame.bit_len(), 159);
    // 159 bits fill bytes 1..=20; the last (partial) byte is mirrored at 29
    assert_eq!(frame.last_written_index(), 20);
    assert_eq!(frame.as_bytes()[LOOP_BYTE_INDEX], frame.as_bytes()[20]);
    assert!(frame.as_bytes()[21..LOOP_BYTE_INDEX].iter().all(|&b| b == 0));
    assert_eq!(frame.to_sequence(), rotate_and_drop(&bits).unwrap());
}

#[test]
fn test_largest_period_fits_exactly() {
    let bits = BitSequence::from_samples(&modulate_period(MAX_FRAME_BITS + 1));
    let frame = encode_loop(&bits).unwrap();
    assert_eq!(frame.bit_len(), MAX_FRAME_BITS);
    assert_eq!(frame.last_written_index(), LOOP_BYTE_INDEX);
}

#[test]
fn test_oversized_period_is_rejected() {
    let bits = BitSequence::from_samples(&modulate_period(MAX_FRAME_BITS + 2));
    assert_eq!(
        encode_loop(&bits).unwrap_err(),
        FrameError::BufferOverflow {
            bits: MAX_FRAME_BITS + 1,
            capacity: MAX_FRAME_BITS
        }
    );
}
