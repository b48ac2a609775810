//! # dsloop CLI
//!
//! Building blocks of the `dsloop` binary: run configuration, the
//! modulate → align → pack pipeline, report formatting, and the serial upload handshake.

pub mod config;
pub mod pipeline;
pub mod report;
pub mod transport;

pub use config::{ConfigError, RunConfig, TimeoutPolicy, DEFAULT_SAMPLE_COUNT};
pub use pipeline::{align_loop, modulate_period, AlignedLoop, ModulatedPeriod};
pub use transport::{Handshake, Stage, TransportError, BAUD_RATE};
