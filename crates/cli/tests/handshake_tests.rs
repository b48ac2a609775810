//! Handshake tests against in-memory streams.

use dsloop_bitstream::{pack, BitSequence, PackedFrame, FRAME_LEN};
use dsloop_cli::transport::{DONE_SIGNAL, READY_SIGNAL};
use dsloop_cli::{Handshake, Stage, TimeoutPolicy, TransportError};
use std::collections::VecDeque;
use std::io::{self, ErrorKind, Read, Write};
use std::time::Duration;

/// Scripted device: each read pops one event, writes are captured.
#[derive(Default)]
struct MockDevice {
    replies: VecDeque<Reply>,
    written: Vec<u8>,
    flushes: usize,
}

enum Reply {
    Byte(u8),
    TimedOut,
}

impl MockDevice {
    fn replying(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl Read for MockDevice {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.replies.pop_front() {
            Some(Reply::Byte(b)) => {
                buf[0] = b;
                Ok(1)
            }
            Some(Reply::TimedOut) => Err(io::Error::new(ErrorKind::TimedOut, "timed out")),
            None => Ok(0),
        }
    }
}

impl Write for MockDevice {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

fn sample_frame() -> PackedFrame {
    pack(&BitSequence::from_bits(&[1, 1, 0, 1])).unwrap()
}

#[test]
fn test_successful_upload_writes_whole_frame() {
    let device = MockDevice::replying([Reply::Byte(READY_SIGNAL), Reply::Byte(DONE_SIGNAL)]);
    let mut handshake = Handshake::new(device, TimeoutPolicy::Indefinite);
    let frame = sample_frame();

    handshake.upload(&frame).unwrap();

    let device = handshake.into_inner();
    assert_eq!(device.written.len(), FRAME_LEN);
    assert_eq!(device.written.as_slice(), frame.as_bytes());
    assert_eq!(device.flushes, 1);
    assert!(device.replies.is_empty());
}

#[test]
fn test_wrong_ready_byte_aborts_before_writing() {
    let device = MockDevice::replying([Reply::Byte(b'!')]);
    let mut handshake = Handshake::new(device, TimeoutPolicy::Indefinite);

    let err = handshake.upload(&sample_frame()).unwrap_err();
    assert!(matches!(err, TransportError::UnexpectedReady { observed: b'!' }));
    assert!(handshake.into_inner().written.is_empty());
}

#[test]
fn test_wrong_done_byte_reports_done_byte() {
    let device = MockDevice::replying([Reply::Byte(READY_SIGNAL), Reply::Byte(b'x')]);
    let mut handshake = Handshake::new(device, TimeoutPolicy::Indefinite);

    let err = handshake.upload(&sample_frame()).unwrap_err();
    assert!(matches!(err, TransportError::UnexpectedDone { observed: b'x' }));
    assert!(err.to_string().contains("'x'"));
    assert_eq!(handshake.into_inner().written.len(), FRAME_LEN);
}

#[test]
fn test_indefinite_policy_retries_timeouts() {
    let device = MockDevice::replying([
        Reply::TimedOut,
        Reply::TimedOut,
        Reply::TimedOut,
        Reply::Byte(READY_SIGNAL),
        Reply::TimedOut,
        Reply::Byte(DONE_SIGNAL),
    ]);
    let mut handshake = Handshake::new(device, TimeoutPolicy::Indefinite);
    handshake.upload(&sample_frame()).unwrap();
}

#[test]
fn test_bounded_policy_gives_up() {
    let timeout = Duration::from_millis(500);
    let device = MockDevice::replying([Reply::TimedOut, Reply::Byte(READY_SIGNAL)]);
    let mut handshake = Handshake::new(device, TimeoutPolicy::After(timeout));

    let err = handshake.wait_ready().unwrap_err();
    assert!(matches!(
        err,
        TransportError::Timeout {
            stage: Stage::Ready,
            timeout: t
        } if t == timeout
    ));
}

#[test]
fn test_closed_stream_is_io_error() {
    let device = MockDevice::replying([Reply::Byte(READY_SIGNAL)]);
    let mut handshake = Handshake::new(device, TimeoutPolicy::Indefinite);

    let err = handshake.upload(&sample_frame()).unwrap_err();
    match err {
        TransportError::Io { stage, source } => {
            assert_eq!(stage, Stage::Done);
            assert_eq!(source.kind(), ErrorKind::UnexpectedEof);
        }
        other => panic!("unexpected error: {other}"),
    }
}
