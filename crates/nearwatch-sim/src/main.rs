//! Headless nearwatch driver
//!
//! This binary:
//! 1. Loads a config (`NEARWATCH_CONFIG`, JSON) or uses the defaults
//! 2. Spawns an initial population of bots and items at random points
//! 3. Runs the tick loop with the observer orbiting the spawn bounds
//!
//! Commands (one per line on stdin):
//! - `b` or `bot`    - Spawn a bot
//! - `i` or `item`   - Spawn an item
//! - `s` or `status` - Show the active entity of each kind
//! - `q` or `quit`   - Quit
//! - `help`          - Show help

mod command;
mod observer;

use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use eyre::WrapErr as _;
use nearwatch_core::prelude::*;
use tracing::{debug, info};

use crate::command::{Command, input_thread};
use crate::observer::observer_at;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nearwatch_sim=info".parse()?)
                .add_directive("nearwatch_core=info".parse()?),
        )
        .init();

    let config = match std::env::var("NEARWATCH_CONFIG").map(PathBuf::from) {
        Ok(path) => SimConfig::load(&path)
            .wrap_err_with(|| format!("loading config from {}", path.display()))?,
        Err(_) => SimConfig::default(),
    };
    info!(
        neighbor_count = config.neighbor_count,
        "bounds {} .. {}", config.bounds.min, config.bounds.max
    );

    let target_fps: f32 = env_or("TARGET_FPS", 20.0);
    let max_ticks: Option<u64> = std::env::var("NEARWATCH_TICKS")
        .ok()
        .and_then(|v| v.parse().ok());
    let initial_bots: usize = env_or("NEARWATCH_BOTS", 10);
    let initial_items: usize = env_or("NEARWATCH_ITEMS", 10);

    let mut sim = Simulation::new(config, MaterialTable::new())?;
    let mut spawner = match std::env::var("NEARWATCH_SEED")
        .ok()
        .and_then(|v| v.parse().ok())
    {
        Some(seed) => Spawner::seeded(seed),
        None => Spawner::from_entropy(),
    };

    for _ in 0..initial_bots {
        spawner.spawn(&mut sim, Kind::Bot);
    }
    for _ in 0..initial_items {
        spawner.spawn(&mut sim, Kind::Item);
    }

    // Set up command input channel
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    thread::spawn(move || input_thread(std::io::stdin().lock(), cmd_tx));

    // Headless runs with a tick limit go as fast as possible
    let target_delta = Duration::from_secs_f32(1.0 / target_fps.max(1.0));
    let mut running = true;

    while running {
        let start = Instant::now();

        while let Ok(cmd) = cmd_rx.try_recv() {
            match cmd {
                Command::Spawn(kind) => {
                    spawner.spawn(&mut sim, kind);
                }
                Command::Status => report_status(&sim),
                Command::Quit => {
                    info!("Shutting down...");
                    running = false;
                }
                Command::Help => {
                    info!("Commands:");
                    info!("  b, bot     - Spawn a bot");
                    info!("  i, item    - Spawn an item");
                    info!("  s, status  - Show the active entity of each kind");
                    info!("  q, quit    - Quit");
                }
                Command::Unknown(s) => {
                    if !s.is_empty() {
                        info!("Unknown command: '{}'. Type 'help' for commands.", s);
                    }
                }
            }
        }

        let observer = observer_at(sim.tick_count(), &sim.config().bounds);
        let report = sim.tick(observer);

        for event in &report.applied {
            debug!(tick = report.tick, "highlight {} -> {}", event.demote, event.promote);
        }

        if report.tick.is_multiple_of(20) {
            report_status(&sim);
        }

        if let Some(max) = max_ticks {
            if report.tick >= max {
                report_status(&sim);
                break;
            }
            continue;
        }

        // Sleep to maintain target FPS
        let elapsed = start.elapsed();
        if elapsed < target_delta {
            thread::sleep(target_delta - elapsed);
        }
    }

    Ok(())
}

/// Log the active entity of each kind and whether it is the true closest.
fn report_status(sim: &Simulation<MaterialTable>) {
    // Where the observer stood during the last tick
    let observer = observer_at(sim.tick_count().saturating_sub(1), &sim.config().bounds);

    for kind in Kind::ALL {
        let Some(active) = sim.active(kind) else {
            info!(tick = sim.tick_count(), "no {kind}s registered");
            continue;
        };
        let exact = sim.nearest_by_scan(kind, observer) == Some(active);
        info!(
            tick = sim.tick_count(),
            population = sim.population(kind).len(),
            exact,
            "closest {kind}: {active}"
        );
    }
}
