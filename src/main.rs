use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use std::path::{Path, PathBuf};
use tracing::info;

mod canvas;
mod color;
mod config;
mod display;
mod scene;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "phasor")]
#[command(author, version, about = "Rotating vector and its sine-wave trace, in the terminal")]
struct Args {
    /// Config file path (defaults to ~/.config/phasor/config.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a commented default config to the XDG path and exit
    #[arg(long)]
    init_config: bool,

    /// Milliseconds between animation ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Degrees the vector turns per tick
    #[arg(long, allow_negative_numbers = true)]
    step: Option<f32>,

    /// Number of samples in the wave trace
    #[arg(short, long)]
    samples: Option<usize>,

    /// Multiplier for fixed pixel sizes (margin, markers, label box)
    #[arg(long)]
    scale: Option<f32>,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("phasor=info".parse()?);

    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "phasor", &mut std::io::stdout());
        return Ok(());
    }

    init_logging(args.log_file.as_deref())?;

    if args.init_config {
        let path = Config::init_default_config()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    // Load or create config
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_from_default_path().unwrap_or_default(),
    };
    config.merge_args(&args);
    config.validate()?;

    info!(
        "Starting phasor: tick {}ms, step {}°, {} samples, scale {}",
        config.animation.tick_ms,
        config.animation.step_degrees,
        config.scene.samples,
        config.scene.scale
    );

    display::terminal::run(config).await
}
