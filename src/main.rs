//! osc-replay - Main Entry Point
//!
//! Loads a capture log and replays it over OSC/UDP at a fixed frame rate
//! until Ctrl-C. The `light-offsets` subcommand sends synthetic
//! `/light/offset` frames instead.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use osc_replay::generator::{run_light_offsets, DEFAULT_LIGHT_OFFSET_PORT, LIGHT_OFFSET_ADDRESS};
use osc_replay::{
    load_entries_from_path, replay, shutdown_channel, OscUdpTransport, ReplayConfig,
    ShutdownHandle,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(
    name = "osc-replay",
    version,
    about = "Replay OSC mocap messages from a log file, looping at a fixed FPS.",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// TOML config file (default: <config dir>/osc-replay/config.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    replay: ReplayArgs,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a capture log (the default)
    Replay(ReplayArgs),
    /// Send random /light/offset frames
    LightOffsets(TargetArgs),
}

#[derive(Debug, Clone, Args)]
struct ReplayArgs {
    /// Path to the capture log (default: log.txt)
    #[arg(short = 'l', long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    target: TargetArgs,
}

#[derive(Debug, Clone, Args)]
struct TargetArgs {
    /// OSC target IP/address (default: 127.0.0.1)
    #[arg(long)]
    send_address: Option<String>,

    /// OSC target port (default: 9000, 57120 for light-offsets)
    #[arg(long)]
    send_port: Option<u16>,

    /// Replay rate in frames per second (default: 14.0)
    #[arg(long)]
    fps: Option<f64>,
}

impl TargetArgs {
    fn apply(&self, config: &mut ReplayConfig) {
        if let Some(address) = &self.send_address {
            config.send_address = address.clone();
        }
        if let Some(port) = self.send_port {
            config.send_port = port;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
    }
}

/// Keep the returned guard alive for the lifetime of the process
fn init_logging(config: &ReplayConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "osc-replay.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,osc_replay=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}

fn install_ctrlc(handle: ShutdownHandle) -> anyhow::Result<()> {
    ctrlc::set_handler(move || {
        tracing::info!("Received shutdown signal");
        handle.trigger();
    })
    .context("Error setting Ctrl-C handler")
}

fn run_replay(config: &ReplayConfig) -> anyhow::Result<()> {
    let sequence = load_entries_from_path(&config.log_file)?;
    let mut transport = OscUdpTransport::new(&config.send_address, config.send_port)?;

    let (handle, signal) = shutdown_channel();
    install_ctrlc(handle)?;

    println!(
        "Replaying {} messages from {} -> {} @ {} FPS",
        sequence.len(),
        config.log_file.display(),
        config.destination(),
        config.fps
    );

    replay(&sequence, &mut transport, config.fps, &signal)?;
    println!("Replay stopped by user.");
    Ok(())
}

fn run_offsets(config: &ReplayConfig) -> anyhow::Result<()> {
    let mut transport = OscUdpTransport::new(&config.send_address, config.send_port)?;

    let (handle, signal) = shutdown_channel();
    install_ctrlc(handle)?;

    println!(
        "Sending {} -> {} @ {} FPS",
        LIGHT_OFFSET_ADDRESS,
        config.destination(),
        config.fps
    );

    run_light_offsets(&mut transport, config.fps, &signal)?;
    println!("Test stopped by user.");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ReplayConfig::resolve(cli.config.as_deref())?;

    let offsets = match &cli.command {
        Some(Command::LightOffsets(target)) => {
            config.send_port = DEFAULT_LIGHT_OFFSET_PORT;
            target.apply(&mut config);
            true
        }
        Some(Command::Replay(args)) => {
            apply_replay_args(args, &mut config);
            false
        }
        None => {
            apply_replay_args(&cli.replay, &mut config);
            false
        }
    };
    config.validate()?;

    let _log_guard = init_logging(&config);
    tracing::debug!("Resolved config: {:?}", config);

    if offsets {
        run_offsets(&config)
    } else {
        run_replay(&config)
    }
}

fn apply_replay_args(args: &ReplayArgs, config: &mut ReplayConfig) {
    if let Some(path) = &args.log_file {
        config.log_file = path.clone();
    }
    args.target.apply(config);
}
