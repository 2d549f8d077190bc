//! Scenario files describing the battle to simulate.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use skirmish_core::UnitTemplate;
use skirmish_system_battle::DEFAULT_MAX_ROUNDS;
use thiserror::Error;

const BUILTIN_SCENARIO: &str = include_str!("../scenarios/default.toml");

/// Unit templates and limits shared by both armies.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub(crate) struct Scenario {
    /// Seed for the roster builder's placement draws.
    pub(crate) seed: u64,
    /// Point budget available to each army.
    pub(crate) max_points: u32,
    /// Rounds played before the battle ends in a stalemate.
    #[serde(default = "default_max_rounds")]
    pub(crate) max_rounds: u32,
    /// Cells a melee unit may walk per turn; unlimited when absent.
    #[serde(default)]
    pub(crate) max_steps_per_turn: Option<u32>,
    /// Templates both armies recruit from.
    pub(crate) units: Vec<UnitTemplate>,
}

fn default_max_rounds() -> u32 {
    DEFAULT_MAX_ROUNDS
}

/// Errors raised while loading a scenario.
#[derive(Debug, Error)]
pub(crate) enum ScenarioError {
    /// The scenario file could not be read.
    #[error("could not read scenario {}", path.display())]
    Read {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The scenario contents are not valid TOML for a scenario.
    #[error("could not parse scenario")]
    Parse(#[from] toml::de::Error),
    /// The scenario does not list any unit templates.
    #[error("scenario lists no unit templates")]
    NoUnits,
}

impl Scenario {
    /// Scenario compiled into the binary.
    pub(crate) fn builtin() -> Result<Self, ScenarioError> {
        Self::parse(BUILTIN_SCENARIO)
    }

    /// Reads and parses a scenario file.
    pub(crate) fn load(path: &Path) -> Result<Self, ScenarioError> {
        let contents = fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&contents)
    }

    fn parse(contents: &str) -> Result<Self, ScenarioError> {
        let scenario: Self = toml::from_str(contents)?;
        if scenario.units.is_empty() {
            return Err(ScenarioError::NoUnits);
        }
        Ok(scenario)
    }
}
