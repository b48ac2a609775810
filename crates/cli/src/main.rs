//! # dsloop
//!
//! Modulates one period of a sine into a single-bit stream, aligns it for
//! seamless looping, packs it into a 30-byte frame and uploads the frame to
//! the playback microcontroller over a serial port.

use anyhow::{Context, Result};
use clap::Parser;
use dsloop_cli::transport::{list_ports, upload_frame};
use dsloop_cli::report::{general, REPORT_PRECISION};
use dsloop_cli::{
    align_loop, modulate_period, AlignedLoop, ModulatedPeriod, RunConfig, TimeoutPolicy,
    DEFAULT_SAMPLE_COUNT,
};
use dsloop_modulation::DEFAULT_FEEDBACK_SLOPE;
use dsloop_timing::DEFAULT_CPU_CLOCK_HZ;
use tracing_subscriber::EnvFilter;

/// Upload a pulse-density modulated sine loop to a playback microcontroller
#[derive(Parser)]
#[command(name = "dsloop")]
#[command(version)]
struct Cli {
    /// Serial port to upload to. Pass ? to list ports.
    port: String,

    /// Number of samples in the generated waveform
    #[arg(short = 'n', default_value_t = DEFAULT_SAMPLE_COUNT)]
    samples: usize,

    /// CPU clock frequency of the playback device in Hz
    #[arg(long, default_value_t = DEFAULT_CPU_CLOCK_HZ)]
    fcpu: u64,

    /// Feedback step used when modulating the waveform
    #[arg(long, default_value_t = DEFAULT_FEEDBACK_SLOPE)]
    dslope: f64,

    /// Show every modulation step
    #[arg(long)]
    vmod: bool,

    /// Show the packed frame as hex
    #[arg(long)]
    vpack: bool,

    /// Give up on a handshake byte after this many milliseconds (default: wait forever)
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Log filter directive, e.g. "debug" or "dsloop_bitstream=trace" (RUST_LOG wins)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    if cli.port == "?" {
        return list_ports().context("Failed to enumerate serial ports");
    }

    let config = RunConfig::new(cli.samples, cli.fcpu, cli.dslope).context("Invalid settings")?;
    let policy = TimeoutPolicy::from_millis(cli.timeout_ms).context("Invalid settings")?;

    let period = modulate_period(&config)?;
    print_period(&period, cli.vmod);

    let aligned = align_loop(&period)?;
    if cli.vpack {
        print_packing(&aligned);
    }

    upload_frame(&cli.port, &aligned.frame, policy)
        .with_context(|| format!("Failed to upload frame to {}", cli.port))?;

    println!("done");
    Ok(())
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid log level '{}'", level))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn print_period(period: &ModulatedPeriod, show_modulation: bool) {
    println!(
        "tsample={:>6}",
        general(period.clock.interval(), REPORT_PRECISION)
    );
    println!("fsin={:>6}", general(period.frequency, REPORT_PRECISION));

    if show_modulation {
        for sample in &period.samples {
            println!(
                "{:+} {:10.6} {:10.6}",
                sample.decision.sign(),
                sample.command,
                sample.feedback
            );
        }
    }
}

fn print_packing(aligned: &AlignedLoop) {
    println!("packed={}", aligned.frame.to_hex());
}
