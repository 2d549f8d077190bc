#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Skirmish battle simulator.
//!
//! This crate defines the vocabulary every other crate speaks: grid cells and
//! dimensions, unit templates and snapshots, the routes produced by the path
//! search, and the armies assembled by the roster builder. The battlefield owns
//! mutable unit state; systems only ever observe it through [`UnitSnapshot`]
//! values and answer with routes, target lists, or [`AttackReport`]s.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Dimensions of the standard battlefield: 27 columns by 21 rows.
pub const BATTLEFIELD: GridDimensions = GridDimensions::new(27, 21);

/// Width and height of a rectangular cell grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDimensions {
    width: u32,
    height: u32,
}

impl GridDimensions {
    /// Creates a new grid description with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells covered by the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let cells = u64::from(self.width) * u64::from(self.height);
        usize::try_from(cells).unwrap_or(0)
    }

    /// Reports whether the cell lies inside the grid bounds.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.width && cell.row() < self.height
    }

    /// Row-major offset of the cell inside a dense grid buffer.
    ///
    /// Returns `None` for cells outside the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }

        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.width).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

impl Default for GridDimensions {
    fn default() -> Self {
        BATTLEFIELD
    }
}

impl fmt::Display for GridDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell (the x axis).
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell (the y axis).
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Reports whether the two cells share an edge.
    #[must_use]
    pub fn is_adjacent_to(self, other: CellCoord) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Unique identifier assigned to a deployed unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(u32);

impl UnitId {
    /// Creates a new unit identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// The two opposing armies on the battlefield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Player army deployed along the left edge.
    Left,
    /// Computer army deployed along the right edge.
    Right,
}

impl Side {
    /// Returns the opposing side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// How a unit delivers its attacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackKind {
    /// Must walk up to the target and strike from an adjacent cell.
    Melee,
    /// Fires at any exposed target without moving.
    Ranged,
}

/// Recruitable unit type together with its base statistics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitTemplate {
    /// Display name of the template.
    pub name: String,
    /// Unit type used to name copies and to look up bonuses.
    pub unit_type: String,
    /// Starting health of every copy.
    pub health: u32,
    /// Damage dealt per attack before bonuses.
    pub base_attack: u32,
    /// Point cost of a single copy.
    pub cost: u32,
    /// Whether copies fight in melee or at range.
    pub attack_kind: AttackKind,
    /// Damage multipliers keyed by the defender's unit type.
    #[serde(default)]
    pub attack_bonuses: BTreeMap<String, f64>,
    /// Damage divisors keyed by the attacker's unit type.
    #[serde(default)]
    pub defence_bonuses: BTreeMap<String, f64>,
}

impl UnitTemplate {
    /// Multiplier applied when attacking a unit of the given type.
    #[must_use]
    pub fn attack_bonus_against(&self, unit_type: &str) -> f64 {
        self.attack_bonuses.get(unit_type).copied().unwrap_or(1.0)
    }

    /// Divisor applied when defending against a unit of the given type.
    #[must_use]
    pub fn defence_bonus_against(&self, unit_type: &str) -> f64 {
        self.defence_bonuses.get(unit_type).copied().unwrap_or(1.0)
    }

    /// Combined attack and health earned per point spent.
    ///
    /// Templates with zero cost report `f64::INFINITY`; the roster builder
    /// rejects them before this value is ever used for ordering.
    #[must_use]
    pub fn value_per_point(&self) -> f64 {
        let value = f64::from(self.base_attack) + f64::from(self.health);
        if self.cost == 0 {
            return f64::INFINITY;
        }
        value / f64::from(self.cost)
    }
}

/// Read-only view of a unit used by the path search and targeting systems.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitSnapshot {
    /// Identifier of the unit.
    pub id: UnitId,
    /// Army the unit fights for.
    pub side: Side,
    /// Cell currently occupied by the unit.
    pub cell: CellCoord,
    /// Whether the unit still has health remaining.
    pub alive: bool,
}

/// Ordered cells leading from an attacker's position to a target's position.
///
/// An empty route means the target cannot be reached.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    cells: Vec<CellCoord>,
}

impl Route {
    /// Creates a route from cells ordered start to end.
    #[must_use]
    pub fn from_cells(cells: Vec<CellCoord>) -> Self {
        Self { cells }
    }

    /// Empty route reported when no path exists.
    #[must_use]
    pub const fn unreachable() -> Self {
        Self { cells: Vec::new() }
    }

    /// Cells of the route, starting cell first.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Reports whether the route is empty, meaning the target is unreachable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells on the route, both endpoints included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Number of single-cell moves needed to walk the route.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// First cell of the route.
    #[must_use]
    pub fn start(&self) -> Option<CellCoord> {
        self.cells.first().copied()
    }

    /// Last cell of the route.
    #[must_use]
    pub fn end(&self) -> Option<CellCoord> {
        self.cells.last().copied()
    }

    /// Consumes the route, yielding the underlying cells.
    #[must_use]
    pub fn into_vec(self) -> Vec<CellCoord> {
        self.cells
    }
}

/// Template copy selected by the roster builder and assigned a cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recruit {
    /// Name of this copy, `"<unit type> <index>"`.
    pub name: String,
    /// Statistics the copy was recruited with.
    pub template: UnitTemplate,
    /// Cell the copy deploys to.
    pub cell: CellCoord,
}

/// Roster assembled for one side under a point budget.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Army {
    /// Side the army fights for.
    pub side: Side,
    /// Recruited units in selection order.
    pub recruits: Vec<Recruit>,
    /// Total points spent on the recruits.
    pub points: u32,
}

/// Outcome of a single resolved attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttackReport {
    /// Unit that delivered the attack.
    pub attacker: UnitId,
    /// Unit that received the attack.
    pub defender: UnitId,
    /// Cell the attacker fought from.
    pub from: CellCoord,
    /// Health removed from the defender.
    pub damage: u32,
    /// Health the defender has left.
    pub defender_health: u32,
}

impl AttackReport {
    /// Reports whether the attack killed the defender.
    #[must_use]
    pub const fn is_kill(&self) -> bool {
        self.defender_health == 0
    }
}
