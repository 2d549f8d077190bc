#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Greedy roster assembly under a point budget.
//!
//! Templates are ranked by how much attack and health they buy per point and
//! recruited in that order, each up to a fixed copy limit, until the budget
//! runs dry. Every recruit then receives a distinct random cell inside its
//! side's build columns.

use rand::{seq::SliceRandom, Rng};
use skirmish_core::{Army, CellCoord, GridDimensions, Recruit, Side, UnitTemplate, BATTLEFIELD};
use thiserror::Error;
use tracing::debug;

/// Maximum number of copies recruited from a single template.
pub const MAX_SAME_UNITS: u32 = 11;

/// Number of columns along each edge where armies deploy.
pub const BUILD_COLUMNS: u32 = 3;

/// Reasons roster assembly may fail.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RosterError {
    /// Templates must cost at least one point.
    #[error("template `{name}` has zero cost")]
    ZeroCost {
        /// Name of the offending template.
        name: String,
    },
    /// The selected recruits outnumber the free build cells.
    #[error("{required} recruits do not fit into {available} build cells")]
    InsufficientSpace {
        /// Number of recruits selected.
        required: usize,
        /// Number of cells in the build area.
        available: usize,
    },
}

/// Tuning knobs for roster assembly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    max_same_units: u32,
    build_columns: u32,
    dimensions: GridDimensions,
}

impl Config {
    /// Creates a configuration with explicit limits.
    #[must_use]
    pub const fn new(max_same_units: u32, build_columns: u32, dimensions: GridDimensions) -> Self {
        Self {
            max_same_units,
            build_columns,
            dimensions,
        }
    }

    /// Maximum copies recruited from a single template.
    #[must_use]
    pub const fn max_same_units(&self) -> u32 {
        self.max_same_units
    }

    /// Width of each side's build area in columns.
    #[must_use]
    pub const fn build_columns(&self) -> u32 {
        self.build_columns
    }

    /// Dimensions of the battlefield the roster deploys to.
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(MAX_SAME_UNITS, BUILD_COLUMNS, BATTLEFIELD)
    }
}

/// Roster builder that assembles armies from unit templates.
#[derive(Clone, Copy, Debug, Default)]
pub struct RosterBuilder {
    config: Config,
}

impl RosterBuilder {
    /// Creates a roster builder with the provided configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Assembles an army for `side` spending at most `max_points`.
    ///
    /// Templates are visited in descending order of
    /// `(base_attack + health) / cost`, ties keeping their input order. Each
    /// contributes as many copies as the remaining budget allows, capped at
    /// the configured copy limit.
    pub fn generate<R>(
        &self,
        templates: &[UnitTemplate],
        max_points: u32,
        side: Side,
        rng: &mut R,
    ) -> Result<Army, RosterError>
    where
        R: Rng + ?Sized,
    {
        if let Some(template) = templates.iter().find(|template| template.cost == 0) {
            return Err(RosterError::ZeroCost {
                name: template.name.clone(),
            });
        }

        let mut ordered: Vec<&UnitTemplate> = templates.iter().collect();
        ordered.sort_by(|a, b| b.value_per_point().total_cmp(&a.value_per_point()));

        let mut selected: Vec<(String, &UnitTemplate)> = Vec::new();
        let mut spent: u32 = 0;
        for template in ordered {
            let remaining = max_points.saturating_sub(spent);
            let count = (remaining / template.cost).min(self.config.max_same_units);
            for index in 0..count {
                selected.push((format!("{} {}", template.unit_type, index), template));
            }
            spent = spent.saturating_add(count * template.cost);
        }

        let mut cells = self.build_area(side);
        if selected.len() > cells.len() {
            return Err(RosterError::InsufficientSpace {
                required: selected.len(),
                available: cells.len(),
            });
        }

        let (chosen, _) = cells.partial_shuffle(rng, selected.len());
        let recruits: Vec<Recruit> = selected
            .into_iter()
            .zip(chosen.iter().copied())
            .map(|((name, template), cell)| Recruit {
                name,
                template: template.clone(),
                cell,
            })
            .collect();

        debug!(
            %side,
            recruits = recruits.len(),
            points = spent,
            budget = max_points,
            "assembled roster"
        );

        Ok(Army {
            side,
            recruits,
            points: spent,
        })
    }

    /// Cells of the side's build area in column-major order.
    #[must_use]
    pub fn build_area(&self, side: Side) -> Vec<CellCoord> {
        let width = self.config.dimensions.width();
        let height = self.config.dimensions.height();
        let columns = self.config.build_columns.min(width);
        let first_column = match side {
            Side::Left => 0,
            Side::Right => width - columns,
        };

        (first_column..first_column + columns)
            .flat_map(|column| (0..height).map(move |row| CellCoord::new(column, row)))
            .collect()
    }
}
