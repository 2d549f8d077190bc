#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Attack behaviour executed by each unit on its turn.
//!
//! A unit looks at the enemy units exposed to it, picks one, closes the
//! distance if it fights in melee, and strikes. Melee approach routes come
//! from the path search; ranged units fire from where they stand.

use skirmish_core::{
    AttackKind, AttackReport, CellCoord, GridDimensions, Route, UnitId, UnitSnapshot, UnitTemplate,
    BATTLEFIELD,
};
use skirmish_system_pathfinding::PathFinder;
use skirmish_system_targeting::Targeting;
use skirmish_world::{query, Battlefield};
use tracing::{debug, warn};

/// Behaviour a unit runs when the battle loop hands it a turn.
pub trait AttackProgram {
    /// Resolves one turn for `attacker`.
    ///
    /// Returns the attack that landed, or `None` when the unit moved without
    /// attacking, had nothing to attack, or is no longer alive.
    fn attack(&mut self, attacker: UnitId, battlefield: &mut Battlefield) -> Option<AttackReport>;
}

/// Tuning knobs for the default attack behaviour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    max_steps_per_turn: Option<u32>,
}

impl Config {
    /// Creates a configuration limiting melee movement per turn.
    ///
    /// `None` lets a melee unit walk its whole route in a single turn.
    #[must_use]
    pub const fn new(max_steps_per_turn: Option<u32>) -> Self {
        Self { max_steps_per_turn }
    }

    /// Maximum number of cells a melee unit may walk per turn.
    #[must_use]
    pub const fn max_steps_per_turn(&self) -> Option<u32> {
        self.max_steps_per_turn
    }
}

/// Default attack behaviour shared by every unit.
#[derive(Debug)]
pub struct Skirmisher {
    config: Config,
    path_finder: PathFinder,
    targeting: Targeting,
    exposed: Vec<UnitSnapshot>,
}

impl Skirmisher {
    /// Creates the behaviour for battlefields of the provided dimensions.
    #[must_use]
    pub fn new(config: Config, dimensions: GridDimensions) -> Self {
        Self {
            config,
            path_finder: PathFinder::new(dimensions),
            targeting: Targeting::new(dimensions),
            exposed: Vec::new(),
        }
    }

    fn nearest_exposed(&self, origin: CellCoord) -> Option<UnitSnapshot> {
        self.exposed
            .iter()
            .min_by_key(|target| (origin.manhattan_distance(target.cell), target.id))
            .copied()
    }

    fn shortest_approach(
        &self,
        origin: CellCoord,
        snapshots: &[UnitSnapshot],
    ) -> Option<(UnitSnapshot, Route)> {
        let mut best: Option<(UnitSnapshot, Route)> = None;

        for target in &self.exposed {
            let route = self.path_finder.find_path(origin, target.cell, snapshots);
            if route.is_empty() {
                continue;
            }

            let better = match &best {
                None => true,
                Some((current, current_route)) => {
                    (route.edge_count(), target.id) < (current_route.edge_count(), current.id)
                }
            };
            if better {
                best = Some((*target, route));
            }
        }

        best
    }

    /// Walks `attacker` along `route`, stopping short of the target cell.
    fn advance(
        &self,
        attacker: UnitId,
        origin: CellCoord,
        route: &Route,
        battlefield: &mut Battlefield,
    ) -> CellCoord {
        let mut stop = route.len().saturating_sub(2);
        if let Some(limit) = self.config.max_steps_per_turn {
            stop = stop.min(usize::try_from(limit).unwrap_or(usize::MAX));
        }

        let Some(&destination) = route.cells().get(stop) else {
            return origin;
        };
        if destination == origin {
            return origin;
        }

        match battlefield.move_unit(attacker, destination) {
            Ok(()) => destination,
            Err(error) => {
                warn!(unit = attacker.get(), %destination, %error, "approach rejected");
                origin
            }
        }
    }
}

impl Default for Skirmisher {
    fn default() -> Self {
        Self::new(Config::default(), BATTLEFIELD)
    }
}

impl AttackProgram for Skirmisher {
    fn attack(&mut self, attacker: UnitId, battlefield: &mut Battlefield) -> Option<AttackReport> {
        let unit = query::unit(battlefield, attacker)?;
        if !unit.is_alive() {
            return None;
        }
        let side = unit.side();
        let kind = unit.template().attack_kind;
        let origin = unit.cell();

        let snapshots = query::snapshots(battlefield);
        self.targeting.handle(&snapshots, side.opponent(), &mut self.exposed);

        let (defender, from) = match kind {
            AttackKind::Ranged => (self.nearest_exposed(origin)?, origin),
            AttackKind::Melee => {
                let Some((defender, route)) = self.shortest_approach(origin, &snapshots) else {
                    debug!(unit = attacker.get(), %origin, "no reachable target");
                    return None;
                };
                let from = self.advance(attacker, origin, &route, battlefield);
                if !from.is_adjacent_to(defender.cell) {
                    debug!(unit = attacker.get(), %from, "advanced without striking");
                    return None;
                }
                (defender, from)
            }
        };

        let amount = damage(
            query::unit(battlefield, attacker)?.template(),
            query::unit(battlefield, defender.id)?.template(),
        );
        let defender_health = battlefield.apply_damage(defender.id, amount)?;

        Some(AttackReport {
            attacker,
            defender: defender.id,
            from,
            damage: amount,
            defender_health,
        })
    }
}

/// Damage dealt by one attack between units of the given templates.
///
/// The attacker's base attack is multiplied by its bonus against the
/// defender's unit type and divided by the defender's bonus against the
/// attacker's unit type, rounded down, with a floor of one point.
#[must_use]
pub fn damage(attacker: &UnitTemplate, defender: &UnitTemplate) -> u32 {
    let raw = f64::from(attacker.base_attack) * attacker.attack_bonus_against(&defender.unit_type)
        / defender.defence_bonus_against(&attacker.unit_type);
    (raw.floor() as u32).max(1)
}
