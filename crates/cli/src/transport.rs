//! Serial upload handshake.
//!
//! ```text
//!  host                      device
//!   │          '?' (0x3F)       │   device is ready
//!   │ ◄──────────────────────── │
//!   │        30-byte frame      │
//!   │ ────────────────────────► │
//!   │          '.' (0x2E)       │   frame stored
//!   │ ◄──────────────────────── │
//! ```
//!
//! There is no length prefix on the wire; both sides know the frame size.

use crate::config::TimeoutPolicy;
use dsloop_bitstream::PackedFrame;
use serialport::{SerialPort, SerialPortType};
use std::fmt;
use std::io::{self, ErrorKind, Read, Write};
use std::time::Duration;
use thiserror::Error;

/// Fixed line rate of the playback firmware.
pub const BAUD_RATE: u32 = 9600;

/// Byte the device sends when it is ready for a frame.
pub const READY_SIGNAL: u8 = b'?';

/// Byte the device sends once the frame is stored.
pub const DONE_SIGNAL: u8 = b'.';

/// Step of the handshake in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ready,
    Write,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Ready => "ready",
            Stage::Write => "write",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Failure while talking to the device.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("expected ready signal '?' but received {}", describe(.observed))]
    UnexpectedReady { observed: u8 },

    #[error("expected completion signal '.' but received {}", describe(.observed))]
    UnexpectedDone { observed: u8 },

    #[error("timed out after {timeout:?} waiting for the {stage} signal")]
    Timeout { stage: Stage, timeout: Duration },

    #[error("failed to open serial port {port}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("failed to enumerate serial ports")]
    Enumerate(#[source] serialport::Error),

    #[error("serial I/O failed during {stage}")]
    Io {
        stage: Stage,
        #[source]
        source: io::Error,
    },
}

/// Render a byte as `'c' (0x63)` when printable, `0x07` otherwise.
pub fn describe_byte(byte: u8) -> String {
    if byte.is_ascii_graphic() || byte == b' ' {
        format!("'{}' (0x{byte:02x})", byte as char)
    } else {
        format!("0x{byte:02x}")
    }
}

fn describe(byte: &u8) -> String {
    describe_byte(*byte)
}

/// Upload handshake over any byte stream.
///
/// Generic over [`Read`] + [`Write`] so the protocol runs the same against a
/// serial port and an in-memory stream.
///
/// Read timeouts are driven by the stream: with
/// [`TimeoutPolicy::Indefinite`] a timed-out read is simply retried, with
/// [`TimeoutPolicy::After`] it ends the handshake.
#[derive(Debug)]
pub struct Handshake<S> {
    stream: S,
    policy: TimeoutPolicy,
}

impl<S: Read + Write> Handshake<S> {
    pub fn new(stream: S, policy: TimeoutPolicy) -> Self {
        Self { stream, policy }
    }

    /// Block until the device sends [`READY_SIGNAL`].
    pub fn wait_ready(&mut self) -> Result<(), TransportError> {
        let observed = self.read_signal(Stage::Ready)?;
        if observed != READY_SIGNAL {
            return Err(TransportError::UnexpectedReady { observed });
        }
        Ok(())
    }

    /// Write the frame and flush it onto the line.
    pub fn send(&mut self, frame: &PackedFrame) -> Result<(), TransportError> {
        let io_err = |source| TransportError::Io {
            stage: Stage::Write,
            source,
        };
        self.stream.write_all(frame.as_bytes()).map_err(io_err)?;
        self.stream.flush().map_err(io_err)
    }

    /// Block until the device sends [`DONE_SIGNAL`].
    pub fn wait_done(&mut self) -> Result<(), TransportError> {
        let observed = self.read_signal(Stage::Done)?;
        if observed != DONE_SIGNAL {
            return Err(TransportError::UnexpectedDone { observed });
        }
        Ok(())
    }

    /// Run the full exchange: ready, frame, done.
    pub fn upload(&mut self, frame: &PackedFrame) -> Result<(), TransportError> {
        self.wait_ready()?;
        tracing::info!("device ready");

        self.send(frame)?;
        tracing::info!(bytes = frame.as_bytes().len(), "frame written");

        self.wait_done()?;
        tracing::info!("device acknowledged frame");
        Ok(())
    }

    /// Give back the underlying stream.
    pub fn into_inner(self) -> S {
        self.stream
    }

    fn read_signal(&mut self, stage: Stage) -> Result<u8, TransportError> {
        let mut byte = [0u8; 1];
        loop {
            match self.stream.read_exact(&mut byte) {
                Ok(()) => return Ok(byte[0]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == ErrorKind::TimedOut => match self.policy {
                    TimeoutPolicy::Indefinite => {
                        tracing::trace!(%stage, "still waiting for device");
                        continue;
                    }
                    TimeoutPolicy::After(timeout) => {
                        return Err(TransportError::Timeout { stage, timeout })
                    }
                },
                Err(source) => return Err(TransportError::Io { stage, source }),
            }
        }
    }
}

/// Open `port` at [`BAUD_RATE`] with read timeouts taken from `policy`.
pub fn open_port(port: &str, policy: TimeoutPolicy) -> Result<Box<dyn SerialPort>, TransportError> {
    serialport::new(port, BAUD_RATE)
        .timeout(policy.read_timeout())
        .open()
        .map_err(|source| TransportError::Open {
            port: port.to_string(),
            source,
        })
}

/// Open `port` and upload `frame` to the device.
pub fn upload_frame(
    port: &str,
    frame: &PackedFrame,
    policy: TimeoutPolicy,
) -> Result<(), TransportError> {
    let serial = open_port(port, policy)?;
    tracing::info!(port, baud = BAUD_RATE, ?policy, "port open, waiting for ready signal");
    Handshake::new(serial, policy).upload(frame)
}

/// Print the serial ports the system knows about.
pub fn list_ports() -> Result<(), TransportError> {
    let ports = serialport::available_ports().map_err(TransportError::Enumerate)?;
    if ports.is_empty() {
        println!("No serial ports found");
        return Ok(());
    }

    for port in ports {
        println!("{}  {}", port.port_name, describe_port_type(&port.port_type));
    }
    Ok(())
}

fn describe_port_type(port_type: &SerialPortType) -> String {
    match port_type {
        SerialPortType::UsbPort(usb) => {
            let mut label = format!("USB {:04x}:{:04x}", usb.vid, usb.pid);
            if let Some(ref product) = usb.product {
                label.push(' ');
                label.push_str(product);
            }
            label
        }
        SerialPortType::PciPort => "PCI".to_string(),
        SerialPortType::BluetoothPort => "Bluetooth".to_string(),
        SerialPortType::Unknown => "unknown".to_string(),
    }
}
