use crate::battle::calculators::calculate_damage;
use crate::effectiveness::EffectivenessTable;
use crate::errors::MonsterError;
use crate::species::{Species, SpeciesTable};
use crate::stats::{Stats, StatsMode};
use schema::{Element, SpeciesData};
use std::fmt;
use std::sync::Arc;

/// Level every freshly spawned or regenerated monster starts at.
pub const DEFAULT_LEVEL: u32 = 1;

/// A single monster in play.
///
/// Stats are derived from the species entry and the current level on every
/// read, so the only mutable state is the level, the level recorded at the
/// last evolution check, and the current HP. HP is signed: a heavy hit may
/// take it below zero, and anything at or below zero counts as fainted.
#[derive(Debug, Clone, PartialEq)]
pub struct MonsterInstance {
    data: Arc<SpeciesData>,
    stats_mode: StatsMode,
    level: u32,
    original_level: u32,
    current_hp: i32,
}

impl MonsterInstance {
    /// Create a monster at full HP.
    pub fn new(data: Arc<SpeciesData>, stats_mode: StatsMode, level: u32) -> Self {
        let level = level.max(1);
        let mut monster = Self {
            data,
            stats_mode,
            level,
            original_level: level,
            current_hp: 0,
        };
        monster.current_hp = monster.max_hp() as i32;
        monster
    }

    /// Create a monster of `species` from the table at `level`.
    pub fn spawn(
        table: &SpeciesTable,
        species: Species,
        stats_mode: StatsMode,
        level: u32,
    ) -> Result<Self, MonsterError> {
        Ok(Self::new(table.lookup(species)?, stats_mode, level))
    }

    /// A fresh copy of this monster's species at the default level.
    pub fn fresh_copy(&self) -> Self {
        Self::new(Arc::clone(&self.data), self.stats_mode, DEFAULT_LEVEL)
    }

    pub fn species(&self) -> Species {
        self.data.species
    }

    pub fn name(&self) -> String {
        self.data.species.name()
    }

    pub fn element(&self) -> Element {
        self.data.element
    }

    pub fn data(&self) -> &SpeciesData {
        &self.data
    }

    pub fn stats_mode(&self) -> StatsMode {
        self.stats_mode
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn original_level(&self) -> u32 {
        self.original_level
    }

    pub fn stats(&self) -> Stats {
        Stats::at_level(&self.data, self.stats_mode, self.level)
    }

    pub fn attack(&self) -> u32 {
        self.stats().attack
    }

    pub fn defense(&self) -> u32 {
        self.stats().defense
    }

    pub fn speed(&self) -> u32 {
        self.stats().speed
    }

    pub fn max_hp(&self) -> u32 {
        self.stats().max_hp
    }

    pub fn current_hp(&self) -> i32 {
        self.current_hp
    }

    pub fn set_hp(&mut self, hp: i32) {
        self.current_hp = hp;
    }

    /// `max_hp - current_hp`; preserved across level-ups and evolution.
    pub fn hp_deficit(&self) -> i32 {
        self.max_hp() as i32 - self.current_hp
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn is_fainted(&self) -> bool {
        !self.is_alive()
    }

    /// Subtract `amount` HP. Returns true if the monster is now fainted.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.current_hp = self.current_hp.saturating_sub(amount.min(i32::MAX as u32) as i32);
        self.is_fainted()
    }

    /// Strike `defender` once and return the damage dealt.
    pub fn strike(&self, defender: &mut MonsterInstance, effectiveness: &EffectivenessTable) -> u32 {
        let multiplier = effectiveness.effectiveness(self.element(), defender.element());
        let damage = calculate_damage(self.attack(), defender.defense(), multiplier);
        defender.take_damage(damage);
        damage
    }

    /// Gain a level, keeping the same HP deficit.
    pub fn level_up(&mut self) -> Result<(), MonsterError> {
        if self.is_fainted() {
            return Err(MonsterError::Fainted(self.species()));
        }
        let deficit = self.hp_deficit();
        self.level += 1;
        self.current_hp = self.max_hp() as i32 - deficit;
        Ok(())
    }

    /// A monster may evolve once it has gained a level since its last
    /// evolution check and its species has a successor.
    pub fn ready_to_evolve(&self) -> bool {
        self.level > self.original_level && self.data.evolves_into.is_some()
    }

    /// Replace this monster's species with its successor, keeping level and
    /// HP deficit. Returns the new species.
    pub fn evolve(&mut self, table: &SpeciesTable) -> Result<Species, MonsterError> {
        let next = match self.data.evolves_into {
            Some(next) if self.ready_to_evolve() => next,
            _ => return Err(MonsterError::NotReadyToEvolve(self.species())),
        };
        let next_data = table.lookup(next)?;
        let deficit = self.hp_deficit();

        self.data = next_data;
        self.current_hp = self.max_hp() as i32 - deficit;
        self.original_level = self.level;
        Ok(next)
    }
}

impl fmt::Display for MonsterInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LV.{} {}, {}/{} HP",
            self.level,
            self.name(),
            self.current_hp,
            self.max_hp()
        )
    }
}
