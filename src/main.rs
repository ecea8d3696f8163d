//! Anchorage demo CLI
//!
//! Usage:
//!   anchorage [OPTIONS]
//!
//! Options:
//!   --width <W>          Root width (default 375)
//!   --height <H>         Root height (default 667)
//!   -c, --config <FILE>  Solver configuration (TOML format)
//!   --swaps <N>          Number of constraint-set swaps to run (default 2)
//!   -h, --help           Print help
//!
//! Set `RUST_LOG=anchorage=debug` to trace every declared constraint.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use anchorage::layout::ConfigError;
use anchorage::{DemoScene, Frame, SolverConfig, SolverError, SolverHost};

#[derive(Parser)]
#[command(name = "anchorage")]
#[command(about = "Lay out a demo scene with declarative constraints and swap constraint sets")]
struct Cli {
    /// Root width
    #[arg(long, default_value_t = 375.0)]
    width: f64,

    /// Root height
    #[arg(long, default_value_t = 667.0)]
    height: f64,

    /// Solver configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of constraint-set swaps to run
    #[arg(long, default_value_t = 2)]
    swaps: usize,
}

#[derive(Debug, Error)]
enum AppError {
    #[error("failed to load config '{path}': {source}")]
    Config { path: String, source: ConfigError },

    #[error("layout error: {0}")]
    Solver(#[from] SolverError),
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("anchorage=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_frames(title: &str, scene: &DemoScene, host: &SolverHost) {
    println!("{}", title);
    for (name, frame) in scene.frames(host) {
        println!("  {:<10} {}", name, frame);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = match &cli.config {
        Some(path) => SolverConfig::from_file(path).map_err(|source| AppError::Config {
            path: path.display().to_string(),
            source,
        })?,
        None => SolverConfig::default(),
    };

    let mut host = SolverHost::new(config);
    debug!(config = ?host.config(), "solver host created");
    let mut scene = DemoScene::build(&mut host, Frame::new(0.0, 0.0, cli.width, cli.height))?;
    host.layout_if_needed();
    print_frames("initial", &scene, &host);

    for swap in 1..=cli.swaps {
        scene.toggle(&mut host);
        let position = if scene.is_stacked() { "stacked" } else { "bottom" };
        print_frames(&format!("swap {} ({})", swap, position), &scene, &host);
    }

    let broken = host.broken_constraints();
    if !broken.is_empty() {
        eprintln!("{} broken constraint(s):", broken.len());
        for constraint in &broken {
            eprintln!("  {}", host.describe(constraint));
        }
    }
    Ok(())
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
