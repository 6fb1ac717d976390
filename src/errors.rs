use crate::species::Species;
use schema::FormulaError;
use thiserror::Error;

/// Errors raised by team containers and team selection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TeamError {
    /// The team already holds as many monsters as its limit allows
    #[error("team is full (limit {limit})")]
    Capacity { limit: usize },
    /// Retrieve was called on a team with no monsters left
    #[error("team is empty")]
    Empty,
    /// The requested team mode, sort key or provided roster cannot be used
    #[error("invalid team configuration: {0}")]
    InvalidConfiguration(String),
    /// Interactive selection could not read or write its prompt stream
    #[error("team selection input failed: {0}")]
    Input(String),
}

/// Errors raised by monster lifecycle transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MonsterError {
    /// Evolution was requested without a level gain or without a successor species
    #[error("{0} is not ready to evolve")]
    NotReadyToEvolve(Species),
    /// The species table has no entry for the species
    #[error("species not found: {0}")]
    SpeciesNotFound(Species),
    /// Level gains are only granted to monsters that are still standing
    #[error("{0} has fainted")]
    Fainted(Species),
}

/// Errors raised while loading species, effectiveness or configuration data
#[derive(Error, Debug)]
pub enum DataError {
    #[error("failed to parse RON data: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to read data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown element name '{0}'")]
    UnknownElement(String),
    #[error("malformed effectiveness table: {0}")]
    MalformedTable(String),
    #[error("malformed stat formula: {0}")]
    MalformedFormula(#[from] FormulaError),
    #[error("duplicate species entry: {0}")]
    DuplicateSpecies(Species),
    #[error("{from} evolves into {into}, which has no species entry")]
    DanglingEvolution { from: Species, into: Species },
}

/// Errors that abort a running battle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BattleError {
    #[error("team error: {0}")]
    Team(#[from] TeamError),
    #[error("monster error: {0}")]
    Monster(#[from] MonsterError),
}

/// Errors raised by the battle tower
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TowerError {
    #[error("battle error: {0}")]
    Battle(#[from] BattleError),
    #[error("team error: {0}")]
    Team(#[from] TeamError),
    /// A battle was requested before the player's team was set
    #[error("the player's team has not been set")]
    NoPlayerTeam,
}

/// Type alias for Results using TeamError
pub type TeamResult<T> = Result<T, TeamError>;

/// Type alias for Results using BattleError
pub type BattleResult<T> = Result<T, BattleError>;

/// Type alias for Results using DataError
pub type DataResult<T> = Result<T, DataError>;

/// Type alias for Results using TowerError
pub type TowerResult<T> = Result<T, TowerError>;
