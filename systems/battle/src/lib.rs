#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Round-based battle loop.
//!
//! Sides alternate, left first. On its side's turn every living unit runs its
//! attack behaviour once, in ascending identifier order. The battle ends when
//! a side has no living units left, or as a stalemate once the round limit is
//! reached.

use skirmish_core::{AttackReport, Side, UnitId};
use skirmish_system_combat::AttackProgram;
use skirmish_world::{query, Battlefield};
use tracing::{debug, info, warn};

/// Number of rounds played before a battle is declared a stalemate.
pub const DEFAULT_MAX_ROUNDS: u32 = 500;

/// Sink for attacks resolved during a battle.
pub trait BattleLog {
    /// Records a landed attack. The battlefield already reflects its damage.
    fn record(&mut self, battlefield: &Battlefield, report: &AttackReport);
}

impl BattleLog for Vec<AttackReport> {
    fn record(&mut self, _battlefield: &Battlefield, report: &AttackReport) {
        self.push(*report);
    }
}

/// Battle log that emits every attack as a `tracing` event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingBattleLog;

impl BattleLog for TracingBattleLog {
    fn record(&mut self, battlefield: &Battlefield, report: &AttackReport) {
        let name = |id: UnitId| {
            query::unit(battlefield, id)
                .map(|unit| unit.name().to_owned())
                .unwrap_or_else(|| format!("#{}", id.get()))
        };

        info!(
            attacker = %name(report.attacker),
            defender = %name(report.defender),
            from = %report.from,
            damage = report.damage,
            health = report.defender_health,
            killed = report.is_kill(),
            "attack"
        );
    }
}

/// Tuning knobs for the battle loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    max_rounds: u32,
}

impl Config {
    /// Creates a configuration with an explicit round limit.
    #[must_use]
    pub const fn new(max_rounds: u32) -> Self {
        Self { max_rounds }
    }

    /// Rounds played before the battle ends in a stalemate.
    #[must_use]
    pub const fn max_rounds(&self) -> u32 {
        self.max_rounds
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROUNDS)
    }
}

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleOutcome {
    /// One side has living units and the other has none.
    Victory {
        /// Side left standing.
        winner: Side,
        /// Rounds started before the battle ended.
        rounds: u32,
    },
    /// The round limit was reached with both sides still standing, or
    /// neither side had living units to begin with.
    Stalemate {
        /// Rounds played.
        rounds: u32,
    },
}

impl BattleOutcome {
    /// Side left standing, if any.
    #[must_use]
    pub const fn winner(&self) -> Option<Side> {
        match self {
            Self::Victory { winner, .. } => Some(*winner),
            Self::Stalemate { .. } => None,
        }
    }

    /// Rounds started before the battle ended.
    #[must_use]
    pub const fn rounds(&self) -> u32 {
        match self {
            Self::Victory { rounds, .. } | Self::Stalemate { rounds } => *rounds,
        }
    }
}

/// Battle loop driving both armies until one is destroyed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Battle {
    config: Config,
}

impl Battle {
    /// Creates a battle loop with the provided configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the battle to completion.
    pub fn simulate<P, L>(
        &self,
        battlefield: &mut Battlefield,
        program: &mut P,
        log: &mut L,
    ) -> BattleOutcome
    where
        P: AttackProgram + ?Sized,
        L: BattleLog + ?Sized,
    {
        let mut left = query::living_units(battlefield, Side::Left);
        let mut right = query::living_units(battlefield, Side::Right);
        let mut rounds = 0;

        info!(left = left.len(), right = right.len(), "battle started");

        loop {
            if let Some(outcome) = decide(battlefield, rounds) {
                info!(?outcome, "battle finished");
                return outcome;
            }

            if rounds >= self.config.max_rounds {
                warn!(rounds, "round limit reached");
                return BattleOutcome::Stalemate { rounds };
            }

            rounds += 1;
            take_turn(&mut left, battlefield, program, log);
            if query::has_living(battlefield, Side::Right) {
                take_turn(&mut right, battlefield, program, log);
            }

            debug!(
                round = rounds,
                left = query::living_units(battlefield, Side::Left).len(),
                right = query::living_units(battlefield, Side::Right).len(),
                "round finished"
            );
        }
    }
}

fn decide(battlefield: &Battlefield, rounds: u32) -> Option<BattleOutcome> {
    let left = query::has_living(battlefield, Side::Left);
    let right = query::has_living(battlefield, Side::Right);
    match (left, right) {
        (true, true) => None,
        (true, false) => Some(BattleOutcome::Victory {
            winner: Side::Left,
            rounds,
        }),
        (false, true) => Some(BattleOutcome::Victory {
            winner: Side::Right,
            rounds,
        }),
        (false, false) => Some(BattleOutcome::Stalemate { rounds }),
    }
}

/// Gives every active unit of one side its turn, dropping units found dead.
fn take_turn<P, L>(
    active: &mut Vec<UnitId>,
    battlefield: &mut Battlefield,
    program: &mut P,
    log: &mut L,
) where
    P: AttackProgram + ?Sized,
    L: BattleLog + ?Sized,
{
    active.retain(|&id| {
        let alive = query::unit(battlefield, id).map_or(false, |unit| unit.is_alive());
        if !alive {
            return false;
        }

        if let Some(report) = program.attack(id, battlefield) {
            log.record(battlefield, &report);
        }
        true
    });
}
