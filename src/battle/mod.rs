pub mod ai;
pub mod calculators;
pub mod engine;
pub mod state;

pub use engine::{Battle, BattleReport};
pub use state::{BattleEvent, BattleState, EventBus, GameState};

#[cfg(test)]
pub(crate) mod tests;
