//! scope-sender: streams a single-column CSV to `udpscope`, one value per
//! datagram, at a fixed rate.
//!
//! ```text
//! scope-sender --filename ecg.csv --sample-f 100 --noise 5
//! ```

mod filter;
mod signal;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scope_net::{Endpoint, Transmitter};
use signal::{Shaping, Signal};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// CSV file; only the first column is used
    #[arg(short, long)]
    filename: std::path::PathBuf,

    /// Treat the first row as data rather than a header
    #[arg(long, default_value_t = false)]
    no_header: bool,

    /// Destination port on 127.0.0.1
    #[arg(short, long, default_value_t = Endpoint::DEFAULT_PORT)]
    port: u16,

    /// Sample frequency of the data, in Hz
    #[arg(long, default_value_t = 200, value_parser = clap::value_parser!(u32).range(1..=1000))]
    sample_f: u32,

    /// Skip n samples after every transmission
    #[arg(long, default_value_t = 0)]
    skip_n: usize,

    /// Low-pass cutoff in Hz (at or above Nyquist disables it)
    #[arg(long, default_value_t = 200)]
    lp_filter: u32,

    /// High-pass cutoff in Hz (0 disables it)
    #[arg(long, default_value_t = 0)]
    hp_filter: u32,

    /// Noise level in percent of full scale
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=100))]
    noise: u8,

    /// Send whole numbers 0..=1000 instead of floats in -1..=1
    #[arg(long, default_value_t = false)]
    int_mode: bool,

    /// Seed the noise generator for a repeatable stream
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let raw = signal::load_csv(&args.filename, !args.no_header)
        .with_context(|| format!("reading {}", args.filename.display()))?;
    let data = signal::normalise(&raw)
        .with_context(|| format!("normalising {}", args.filename.display()))?;

    let shaping = Shaping {
        sample_rate: args.sample_f,
        skip_n:      args.skip_n,
        lowpass_hz:  args.lp_filter,
        highpass_hz: args.hp_filter,
        noise_pct:   args.noise,
        int_mode:    args.int_mode,
    };
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut signal = Signal::new(data, shaping, rng)?;

    let transmitter = Transmitter::new(Endpoint::localhost(args.port))?;

    info!("Destination:  {}", transmitter.dest());
    info!("Samples:      {}", raw.len());
    info!("Sample freq:  {} Hz", shaping.sample_rate);
    info!("Filters:      LP {} Hz, HP {} Hz", shaping.lowpass_hz, shaping.highpass_hz);
    info!("Noise level:  {}%", shaping.noise_pct);
    info!("Skipping:     {} sample(s)", shaping.skip_n);
    info!(
        "Mode:         {}",
        if shaping.int_mode { "ints (0 -> 1000)" } else { "floats (-1 -> 1)" }
    );
    info!("Starting transmission");

    let mut interval = tokio::time::interval(Duration::from_millis(signal.delay_ms()));
    loop {
        interval.tick().await;
        let value = signal.next_value();
        transmitter.send_raw(signal.payload(value).as_bytes())?;
    }
}
