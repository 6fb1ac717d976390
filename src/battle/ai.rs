//! A module for defining the policies that pick each side's battle action.

use crate::monster::MonsterInstance;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a side does with its active monster this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Attack,
    /// Return the active monster to the team and retrieve the next one.
    Swap,
    /// Return the active monster, reorder the team, then retrieve.
    Special,
}

/// A trait for any system that can decide on a battle action.
pub trait Behavior: fmt::Debug {
    /// Inspects both active monsters and decides what `own` does this turn.
    fn decide_action(&self, own: &MonsterInstance, enemy: &MonsterInstance) -> Action;
}

/// Attack when at least as fast or at least as healthy as the enemy,
/// otherwise swap out.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBehavior;

impl Behavior for DefaultBehavior {
    fn decide_action(&self, own: &MonsterInstance, enemy: &MonsterInstance) -> Action {
        if own.speed() >= enemy.speed() || own.current_hp() >= enemy.current_hp() {
            Action::Attack
        } else {
            Action::Swap
        }
    }
}

/// Always picks the same action.
#[derive(Debug, Clone, Copy)]
pub struct FixedBehavior(pub Action);

impl Behavior for FixedBehavior {
    fn decide_action(&self, _own: &MonsterInstance, _enemy: &MonsterInstance) -> Action {
        self.0
    }
}
