use crate::battle::ai::{Action, FixedBehavior};
use crate::effectiveness::EffectivenessTable;
use crate::errors::BattleResult;
use crate::monster::{MonsterInstance, DEFAULT_LEVEL};
use crate::species::{Species, SpeciesTable};
use crate::stats::StatsMode;
use crate::team::{MonsterTeam, TeamMode, TeamOptions};
use schema::{Element, SimpleStats, SpeciesData, StatFormulas};
use std::sync::Arc;

/// A builder for creating test monster instances with common defaults.
///
/// The species entry starts as a copy of the built-in one; overrides only
/// affect the built monster, never the shared table.
///
/// # Example
/// ```
/// let monster = TestMonsterBuilder::new(Species::Flamikin)
///     .stats(50, 5, 10, 30)
///     .element(Element::Normal)
///     .with_hp(25)
///     .build();
/// ```
pub struct TestMonsterBuilder {
    data: SpeciesData,
    stats_mode: StatsMode,
    level: u32,
    current_hp: Option<i32>,
}

impl TestMonsterBuilder {
    /// Creates a new builder for a given species at the default level.
    pub fn new(species: Species) -> Self {
        let data = match SpeciesTable::builtin().get(species) {
            Some(data) => (**data).clone(),
            None => panic!("Failed to load species data for {:?}", species),
        };
        Self {
            data,
            stats_mode: StatsMode::Simple,
            level: DEFAULT_LEVEL,
            current_hp: None,
        }
    }

    /// Sets attack, defense, speed and max HP for both stat modes.
    pub fn stats(mut self, attack: u32, defense: u32, speed: u32, max_hp: u32) -> Self {
        let stats = SimpleStats {
            attack,
            defense,
            speed,
            max_hp,
        };
        self.data.simple_stats = stats;
        self.data.complex_stats = StatFormulas::from(stats);
        self
    }

    pub fn element(mut self, element: Element) -> Self {
        self.data.element = element;
        self
    }

    pub fn evolves_into(mut self, next: Option<Species>) -> Self {
        self.data.evolves_into = next;
        self
    }

    pub fn level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn stats_mode(mut self, stats_mode: StatsMode) -> Self {
        self.stats_mode = stats_mode;
        self
    }

    /// Sets the current HP. If not set, HP will be max.
    pub fn with_hp(mut self, hp: i32) -> Self {
        self.current_hp = Some(hp);
        self
    }

    /// The species entry the monster will be built from.
    pub fn data(&self) -> &SpeciesData {
        &self.data
    }

    pub fn build(self) -> MonsterInstance {
        let mut monster = MonsterInstance::new(Arc::new(self.data), self.stats_mode, self.level);
        if let Some(hp) = self.current_hp {
            monster.set_hp(hp);
        }
        monster
    }
}

/// A table with no entries: every pairing is neutral.
pub fn neutral_effectiveness() -> EffectivenessTable {
    match EffectivenessTable::new(&[], Vec::new()) {
        Ok(table) => table,
        Err(err) => panic!("Failed to build neutral table: {}", err),
    }
}

/// Team of the given monsters in insertion order, with the default behavior.
pub fn team_of(mode: TeamMode, monsters: Vec<MonsterInstance>) -> MonsterTeam {
    let options = match mode {
        TeamMode::Optimise => TeamOptions::new(mode).with_sort_key(crate::team::SortKey::Hp),
        _ => TeamOptions::new(mode),
    };
    match MonsterTeam::from_monsters(options, monsters) {
        Ok(team) => team,
        Err(err) => panic!("Failed to build test team: {}", err),
    }
}

/// Team whose active monster always takes `action`.
pub fn scripted_team_of(mode: TeamMode, monsters: Vec<MonsterInstance>, action: Action) -> MonsterTeam {
    team_of(mode, monsters).with_behavior(Box::new(FixedBehavior(action)))
}

/// A neutral-element monster with the given stats.
pub fn fighter(species: Species, attack: u32, defense: u32, speed: u32, max_hp: u32) -> MonsterInstance {
    TestMonsterBuilder::new(species)
        .stats(attack, defense, speed, max_hp)
        .element(Element::Normal)
        .evolves_into(None)
        .build()
}

/// Helper function to assert that a Result is Ok and return the value.
/// Provides clear error messages in tests when functions unexpectedly fail.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
