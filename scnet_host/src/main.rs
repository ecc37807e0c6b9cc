//! # SCNET Host Binary
//!
//! Single-threaded host orchestrator for a multi-drop serial servo
//! network: opens the configured channels, prints identity information
//! about every node found, checks that all nodes are supported servo
//! models under full host control, then runs each node's control sequence
//! in turn.
//!
//! # Usage
//!
//! ```bash
//! # Single channel on a numeric hub port
//! scnet_host 1
//!
//! # Single channel on a device path
//! scnet_host /dev/ttyUSB0
//!
//! # Multiple channels from a TOML file
//! scnet_host --config config/network.toml
//!
//! # Verbose logging, no interactive pause
//! scnet_host 1 -v --batch
//! ```

use clap::Parser;
use scnet_common::clock;
use scnet_common::config::{ChannelAddress, NetworkConfig};
use scnet_common::diag;
use scnet_common::error::HostError;
use scnet_host::manager::NetworkManager;
use scnet_host::orchestrate::{orchestrate_default, Outcome};
use scnet_host::registry::TransportRegistry;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, error, info, Level};
use tracing_subscriber::EnvFilter;

/// SCNET Host - orchestrator for multi-drop serial servo networks
#[derive(Parser, Debug)]
#[command(name = "scnet_host")]
#[command(version)]
#[command(about = "Host-side orchestrator for multi-drop serial servo networks")]
#[command(long_about = None)]
struct Args {
    /// Channel address for channel 0 (numeric hub port or device path)
    address: Option<String>,

    /// Path to a network configuration file (multiple channels).
    /// Takes precedence over the positional address.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Transport backend to open channels with
    #[arg(long, default_value = "simulation")]
    transport: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,

    /// Skip the interactive pause before exiting
    #[arg(long)]
    batch: bool,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            pause();
            std::process::exit(Outcome::Usage.code());
        }
    };

    if args.address.is_none() && args.config.is_none() {
        eprintln!("USAGE: scnet_host <address> | --config <FILE>");
        pause();
        std::process::exit(Outcome::Usage.code());
    }

    setup_tracing(&args);

    // Pin the zero point of the log time base at startup.
    let _ = clock::now_ms();

    info!("scnet host v{} starting...", diag::driver_version());

    // Unclassified faults must still reach the pause/exit path; channel
    // teardown is guaranteed by the manager's Drop.
    let outcome = std::panic::catch_unwind(|| run(&args)).unwrap_or_else(|_| {
        error!("Unclassified fault caught at top level");
        Outcome::Unexpected
    });

    info!("scnet host done: {:?} ({})", outcome, outcome.code());

    if !args.batch {
        pause();
    }
    std::process::exit(outcome.code());
}

/// Build the network manager and drive the orchestration sequence.
fn run(args: &Args) -> Outcome {
    debug!("Diagnostic dump dir: {:?}", diag::dump_dir());

    let registry = TransportRegistry::with_builtin();

    let (mut mgr, count) = match build_manager(args, registry) {
        Ok(built) => built,
        Err(e) => {
            error!("Unable to initialize the network: {e}");
            return Outcome::InitFailed;
        }
    };

    orchestrate_default(&mut mgr, count)
}

/// Configure a manager from the TOML file or the positional address.
fn build_manager(
    args: &Args,
    registry: TransportRegistry,
) -> Result<(NetworkManager, usize), HostError> {
    if let Some(path) = &args.config {
        let config = NetworkConfig::load(path)?;
        let mut mgr = NetworkManager::new(registry, config.transport.clone());
        let specs = config.channel_specs()?;
        let count = specs.len();
        for spec in specs {
            mgr.configure_channel_spec(spec)?;
        }
        Ok((mgr, count))
    } else {
        // Presence checked in main.
        let address: ChannelAddress = args
            .address
            .as_deref()
            .unwrap_or_default()
            .parse()?;
        info!("Initializing channel 0 at {}", address);
        let mut mgr = NetworkManager::new(registry, args.transport.clone());
        mgr.configure_channel(0, address)?;
        Ok((mgr, 1))
    }
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Prompt and wait for one line on stdin, so the operator can read the
/// output before the console window closes.
fn pause() {
    print!("Press ENTER to continue.");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    let _ = std::io::stdin().read_line(&mut line);
}
