//! Simulator configuration, read from RON.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```ron
//! (
//!     seed: 7,
//!     verbosity: 1,
//!     player: (mode: Optimise, sort_key: Some(Speed), stats_mode: Complex),
//! )
//! ```

use crate::errors::{DataResult, TeamError, TeamResult};
use crate::stats::StatsMode;
use crate::team::{Selection, SortKey, TeamMode, TeamOptions, TEAM_LIMIT};
use crate::tower::{MAX_LIVES, MIN_LIVES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SEED: u64 = 129371;
pub const DEFAULT_ENEMY_TEAMS: usize = 3;

/// How one team is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TeamConfig {
    pub mode: TeamMode,
    pub sort_key: Option<SortKey>,
    pub stats_mode: StatsMode,
    pub limit: usize,
    pub selection: Selection,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            mode: TeamMode::Back,
            sort_key: None,
            stats_mode: StatsMode::Simple,
            limit: TEAM_LIMIT,
            selection: Selection::Random,
        }
    }
}

impl TeamConfig {
    pub fn options(&self) -> TeamOptions {
        TeamOptions {
            mode: self.mode,
            sort_key: self.sort_key,
            stats_mode: self.stats_mode,
            limit: self.limit,
        }
    }

    pub fn validate(&self) -> TeamResult<()> {
        self.options().container()?;
        if let Selection::Provided(species) = &self.selection {
            if species.is_empty() {
                return Err(TeamError::InvalidConfiguration(
                    "provided team is empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TowerConfig {
    pub seed: u64,
    /// 0 records no battle events, 1 or more records and prints them.
    pub verbosity: u8,
    pub min_lives: u32,
    pub max_lives: u32,
    pub enemy_teams: usize,
    pub player: TeamConfig,
    pub enemy: TeamConfig,
    /// Species roster to use instead of the built-in one.
    pub species_path: Option<PathBuf>,
    /// Effectiveness table to use instead of the built-in one.
    pub effectiveness_path: Option<PathBuf>,
}

impl Default for TowerConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            verbosity: 0,
            min_lives: MIN_LIVES,
            max_lives: MAX_LIVES,
            enemy_teams: DEFAULT_ENEMY_TEAMS,
            player: TeamConfig::default(),
            enemy: TeamConfig::default(),
            species_path: None,
            effectiveness_path: None,
        }
    }
}

impl TowerConfig {
    pub fn from_ron_str(source: &str) -> DataResult<Self> {
        Ok(ron::from_str(source)?)
    }

    pub fn load(path: &Path) -> DataResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }

    /// Log level for the configured verbosity: warnings up to 1, info at 2,
    /// debug from 3.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity {
            0 | 1 => log::LevelFilter::Warn,
            2 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }

    pub fn validate(&self) -> TeamResult<()> {
        if self.min_lives == 0 || self.min_lives > self.max_lives {
            return Err(TeamError::InvalidConfiguration(format!(
                "invalid lives range {}..={}",
                self.min_lives, self.max_lives
            )));
        }
        if self.enemy_teams == 0 {
            return Err(TeamError::InvalidConfiguration(
                "the tower needs at least one enemy team".to_string(),
            ));
        }
        if self.enemy.selection != Selection::Random {
            return Err(TeamError::InvalidConfiguration(
                "enemy teams are always selected randomly".to_string(),
            ));
        }
        self.player.validate()?;
        self.enemy.validate()
    }
}
