//! Collision grid main entry point.
//!
//! A headless 2D space-shooter session used to exercise the uniform collision
//! grid, written in Rust using:
//! - **bevy_ecs** for entity-component-system architecture
//! - **glam** for 2D vector math
//!
//! The player's ship is driven by an autopilot, enemies drift and fire, and
//! every step the grid resolves collisions between the player side and the
//! enemy side. Hits are delivered as observer events.
//!
//! # Project Structure
//!
//! - [`components`] – ECS components (positions, colliders, masks, ship, enemies, etc.)
//! - [`events`] – Collision event and its observers
//! - [`game`] – Session setup, schedule and main loop
//! - [`resources`] – ECS resources (collision grid, config, masks, session stats, etc.)
//! - [`systems`] – ECS systems (input, controllers, movement, collision, respawn)
//!
//! # Main Loop
//!
//! 1. Load `config.ini` and apply command line overrides
//! 2. Load collision masks (built-in, or from a directory)
//! 3. Build the world, register observers, spawn the ship and the first wave
//! 4. Step the schedule a fixed number of frames at `1 / fps` seconds each
//! 5. Print the session summary
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 1200 --seed 42
//! RUST_LOG=debug cargo run -- --frames 10   # grid occupancy per step
//! ```

mod components;
mod events;
mod game;
mod resources;
mod systems;

use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

use crate::game::{build_schedule, build_world, run_session};
use crate::resources::maskstore::MaskStore;
use crate::resources::simulationconfig::SimulationConfig;

/// Collision grid demo session
#[derive(Parser)]
#[command(version, about = "Headless space-shooter session driving a uniform collision grid.")]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Number of fixed steps to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Seed for the session RNG (overrides the config file).
    #[arg(long)]
    seed: Option<u64>,

    /// Directory with `<name>.mask` files overriding the built-in masks.
    #[arg(long, value_name = "DIR")]
    masks: Option<PathBuf>,

    /// Play-area width (overrides the config file).
    #[arg(long)]
    width: Option<u32>,

    /// Play-area height (overrides the config file).
    #[arg(long)]
    height: Option<u32>,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,

    /// Write the effective configuration back to `--config` and exit.
    #[arg(long)]
    write_config: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = SimulationConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{} ({:?}), using defaults", e, cli.config);
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }

    // Early-exit: write the config and quit
    if cli.write_config {
        if let Err(e) = config.save_to_file() {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        return;
    }

    let masks = match &cli.masks {
        Some(dir) => MaskStore::load_dir(dir),
        None => MaskStore::builtin(),
    };

    let mut world = build_world(config, masks);
    let mut schedule = build_schedule(true);
    let stats = run_session(&mut world, &mut schedule, cli.frames);

    if cli.json {
        match serde_json::to_string_pretty(&stats) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing summary: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    info!("Session finished after {} steps", stats.frames);
    println!("steps:             {}", stats.frames);
    println!("collisions:        {}", stats.collisions);
    let mut pairs: Vec<_> = stats.collisions_by_pair.iter().collect();
    pairs.sort();
    for (pair, count) in pairs {
        println!("  {pair:<32} {count}");
    }
    println!("enemies destroyed: {}", stats.enemies_destroyed);
    println!("ships lost:        {}", stats.ships_lost);
    println!("ships spawned:     {}", stats.ships_spawned);
    println!("waves spawned:     {}", stats.waves_spawned);
    println!("shots fired:       {}", stats.shots_fired);
    println!("enemy shots fired: {}", stats.enemy_shots_fired);
}
