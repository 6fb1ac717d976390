// In: src/lib.rs

//! Monster Tower Battle Simulator
//!
//! Turn-based battles between teams of elemental monsters, with levelling,
//! evolution, three team-ordering policies and a battle tower that rotates
//! enemy teams against a persistent player team. Deterministic for a fixed
//! random seed.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod effectiveness;
pub mod errors;
pub mod monster;
pub mod species;
pub mod stats;
pub mod team;
pub mod tower;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    Element, Formula, FormulaError, FormulaToken, SimpleStats, Species, SpeciesData, StatFormulas,
};

// --- From this crate's modules (`src/`) ---

// Battle engine and its event stream.
pub use battle::ai::{Action, Behavior, DefaultBehavior, FixedBehavior};
pub use battle::engine::{Battle, BattleReport};
pub use battle::state::{BattleEvent, BattleState, EventBus, GameState};

// Runtime types.
pub use monster::{MonsterInstance, DEFAULT_LEVEL};
pub use stats::{Stats, StatsMode};
pub use team::{
    spawn_team, MonsterTeam, Selection, SortKey, TeamContainer, TeamMode, TeamOptions, TEAM_LIMIT,
};
pub use tower::{BattleTower, EnemyEntry, TowerBattle};

// Static data.
pub use config::{TeamConfig, TowerConfig};
pub use effectiveness::EffectivenessTable;
pub use species::SpeciesTable;

// Crate-specific error and result types.
pub use errors::{
    BattleError, BattleResult, DataError, DataResult, MonsterError, TeamError, TeamResult,
    TowerError, TowerResult,
};
