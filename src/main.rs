//! Tile Blaster headless runner
//!
//! Drives the simulation with a scripted pilot through the fixed-timestep
//! clock and records every frame into a draw list. Useful for soak runs and
//! balance tuning without a window.

use anyhow::{Context, Result};
use clap::Parser;
use glam::DVec2;
use std::path::PathBuf;

use tile_blaster::clock::FixedTimestep;
use tile_blaster::renderer::{DrawList, draw_scene};
use tile_blaster::sim::{Button, InputState, LevelSet, SimState, tick};
use tile_blaster::{RuleSet, SimConfig};

/// Simulated display refresh rate
const FRAME_DT: f64 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(name = "tile-blaster")]
#[command(about = "Run the tile shooter headless with a scripted pilot")]
struct Cli {
    /// JSON config file (defaults are used when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON level pack replacing the built-in levels
    #[arg(long)]
    levels: Option<PathBuf>,

    /// Rule preset applied on top of the config: classic or arcade
    #[arg(long, value_parser = parse_rules)]
    rules: Option<RuleSet>,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Number of simulation ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Write the effective config to this path before running
    #[arg(long)]
    save_config: Option<PathBuf>,
}

fn parse_rules(name: &str) -> Result<RuleSet, String> {
    RuleSet::from_name(name).ok_or_else(|| format!("unknown rule set '{name}'"))
}

fn load_config(args: &Cli) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(rules) = args.rules {
        config.apply_preset(rules);
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn load_levels(path: Option<&PathBuf>) -> Result<LevelSet> {
    let Some(path) = path else {
        return Ok(LevelSet::builtin());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading level pack {}", path.display()))?;
    LevelSet::from_json_str(&json)
        .with_context(|| format!("parsing level pack {}", path.display()))
}

/// Scripted pilot: sweeps left and right, keeps the trigger held and aims at
/// the closest enemy
fn pilot(state: &SimState, input: &mut InputState) {
    let sweep_left = (state.time_ticks / 20) % 2 == 0;
    input.set(Button::KeyA, sweep_left);
    input.set(Button::KeyD, !sweep_left);
    input.press(Button::MouseLeft);

    let ship = state.ship.pos;
    let target = state
        .enemies
        .values()
        .filter_map(|slot| slot.as_enemy())
        .map(|enemy| enemy.pos)
        .min_by(|a, b| a.distance_squared(ship).total_cmp(&b.distance_squared(ship)));
    input.set_pointer(target.unwrap_or(ship + DVec2::new(0.0, -1.0)));
}

#[derive(Debug, Default)]
struct Totals {
    shots: u64,
    bullets: u64,
    kills: u64,
    spawned: u64,
    stages_cleared: u64,
    deaths: u64,
    draw_calls: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Tile Blaster (headless) starting...");

    let args = Cli::parse();
    let config = load_config(&args)?;
    if let Some(path) = &args.save_config {
        config
            .save(path)
            .with_context(|| format!("saving config {}", path.display()))?;
    }
    let levels = load_levels(args.levels.as_ref())?;
    log::info!(
        "Rules {}, seed {}, {} levels, {} ticks",
        config.rules.as_str(),
        config.seed,
        levels.len(),
        args.ticks
    );

    let mut state = SimState::with_levels(config, levels);
    let mut input = InputState::new();
    let mut clock = FixedTimestep::default();
    let mut frame = DrawList::new();
    let mut totals = Totals::default();

    while state.time_ticks < args.ticks {
        for _ in 0..clock.advance(FRAME_DT) {
            pilot(&state, &mut input);
            let report = tick(&mut state, &mut input);
            totals.shots += report.shots_fired as u64;
            totals.bullets += report.bullets_fired as u64;
            totals.kills += report.enemies_destroyed as u64;
            totals.spawned += report.enemies_spawned as u64;
            totals.stages_cleared += report.stage_cleared as u64;
            totals.deaths += report.ship_destroyed as u64;
        }
        frame.clear();
        draw_scene(&state, &mut frame);
        totals.draw_calls += frame.len() as u64;
    }

    log::info!(
        "Finished at stage {} after {} ticks",
        state.stage.index(),
        state.time_ticks
    );
    println!("{totals:#?}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_typed_flags() {
        let cli = Cli::try_parse_from([
            "tile-blaster",
            "--rules",
            "classic",
            "--seed",
            "42",
            "--ticks",
            "90",
        ])
        .expect("valid flags");
        assert_eq!(cli.rules, Some(RuleSet::Classic));
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.ticks, 90);
        assert!(cli.config.is_none());

        let config = load_config(&cli).expect("config builds");
        assert_eq!(config.projectiles.bullet_max_age, Some(40));
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_cli_defaults_and_rejections() {
        let cli = Cli::try_parse_from(["tile-blaster"]).expect("no flags needed");
        assert_eq!(cli.ticks, 600);
        assert!(cli.rules.is_none());

        assert!(Cli::try_parse_from(["tile-blaster", "--rules", "hardcore"]).is_err());
        assert!(Cli::try_parse_from(["tile-blaster", "--seed", "abc"]).is_err());
        assert!(Cli::try_parse_from(["tile-blaster", "--bogus"]).is_err());
    }
}
