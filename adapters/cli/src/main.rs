#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Skirmish battle from a scenario file.

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skirmish_core::Side;
use skirmish_system_battle::{Battle, BattleOutcome, Config as BattleConfig, TracingBattleLog};
use skirmish_system_combat::{Config as CombatConfig, Skirmisher};
use skirmish_system_roster::RosterBuilder;
use skirmish_world::{query, Battlefield};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Scenario;

/// Mixed into the scenario seed so the two armies draw different placements.
const RIGHT_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulates a battle between two armies recruited from a scenario.
#[derive(Debug, Parser)]
#[command(name = "skirmish", version, about)]
struct Args {
    /// Scenario file to load; the built-in scenario is used when omitted.
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Overrides the scenario's random seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Overrides the scenario's point budget for each army.
    #[arg(long)]
    points: Option<u32>,
    /// Overrides the scenario's round limit.
    #[arg(long)]
    max_rounds: Option<u32>,
}

/// Entry point for the Skirmish command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut scenario = match &args.scenario {
        Some(path) => Scenario::load(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => Scenario::builtin().context("failed to load the built-in scenario")?,
    };
    if let Some(seed) = args.seed {
        scenario.seed = seed;
    }
    if let Some(points) = args.points {
        scenario.max_points = points;
    }
    if let Some(max_rounds) = args.max_rounds {
        scenario.max_rounds = max_rounds;
    }

    let builder = RosterBuilder::default();
    let mut left_rng = ChaCha8Rng::seed_from_u64(scenario.seed);
    let mut right_rng = ChaCha8Rng::seed_from_u64(scenario.seed ^ RIGHT_SEED_SALT);
    let left = builder
        .generate(
            &scenario.units,
            scenario.max_points,
            Side::Left,
            &mut left_rng,
        )
        .context("failed to assemble the left army")?;
    let right = builder
        .generate(
            &scenario.units,
            scenario.max_points,
            Side::Right,
            &mut right_rng,
        )
        .context("failed to assemble the right army")?;

    let mut battlefield = Battlefield::default();
    let _ = battlefield
        .deploy(&left)
        .context("failed to deploy the left army")?;
    let _ = battlefield
        .deploy(&right)
        .context("failed to deploy the right army")?;
    info!(
        seed = scenario.seed,
        left_points = left.points,
        right_points = right.points,
        "armies deployed"
    );

    let battle = Battle::new(BattleConfig::new(scenario.max_rounds));
    let mut program = Skirmisher::new(
        CombatConfig::new(scenario.max_steps_per_turn),
        query::dimensions(&battlefield),
    );
    let outcome = battle.simulate(&mut battlefield, &mut program, &mut TracingBattleLog);

    println!("{}", summary(&outcome, &battlefield));
    Ok(())
}

fn summary(outcome: &BattleOutcome, battlefield: &Battlefield) -> String {
    let left = query::living_units(battlefield, Side::Left).len();
    let right = query::living_units(battlefield, Side::Right).len();
    match outcome {
        BattleOutcome::Victory { winner, rounds } => {
            let standing = match winner {
                Side::Left => left,
                Side::Right => right,
            };
            format!("{winner} wins after {rounds} rounds, {standing} standing")
        }
        BattleOutcome::Stalemate { rounds } => {
            format!("stalemate after {rounds} rounds, {left} vs {right}")
        }
    }
}
