//! Flap Core headless runner
//!
//! Drives the simulation at a fixed tick count without a window: useful for
//! soak-testing the core, replaying seeds and dumping snapshots.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use flap_core::Config;
use flap_core::sim::{Session, SessionEvent, TickInput, tick};

/// Headless simulation runner
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for obstacle placement
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 3000)]
    ticks: u64,

    /// JSON config file (missing fields use defaults)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Number of bodies to fly
    #[arg(short, long, default_value_t = 1)]
    bodies: usize,

    /// Let the demo pilot flap, and restart after each game over
    #[arg(short, long)]
    autopilot: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    dump: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    let config = Arc::new(config);
    log::info!(
        "Flap Core (headless) starting: seed={} ticks={} ({:.1}s of play)",
        args.seed,
        args.ticks,
        args.ticks as f32 * config.tick_seconds()
    );

    let mut session = Session::with_bodies(config, args.seed, args.bodies)
        .context("invalid configuration")?;

    let mut runs = Vec::new();
    let mut input = TickInput {
        autopilot: args.autopilot,
        ..Default::default()
    };

    for _ in 0..args.ticks {
        let events = tick(&mut session, &input);
        session.animate();

        // Clear one-shot inputs after processing
        input.reset = false;

        for event in events {
            if let SessionEvent::GameOver { score } = event {
                runs.push(score);
                log::info!("Run {} ended with score {}", runs.len(), score);
                if args.autopilot {
                    input.reset = true;
                }
            }
        }

        if session.is_over() && !args.autopilot {
            break;
        }
    }

    if !session.is_over() {
        log::info!("Stopped mid-run with score {}", session.score());
    }
    if let Some(best) = runs.iter().max() {
        log::info!("{} finished runs, best score {}", runs.len(), best);
    }

    if args.dump {
        let json = serde_json::to_string_pretty(&session.snapshot())?;
        println!("{json}");
    }

    Ok(())
}
