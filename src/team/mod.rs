//! Monster teams and the ordered containers that back them.
//!
//! A team is one of three container policies chosen at construction:
//! a stack (`Front`), a queue (`Back`) or a list kept sorted by a stat
//! (`Optimise`). Battles only ever see the `MonsterTeam` wrapper.

pub mod back;
pub mod front;
pub mod optimise;
pub mod selection;

pub use back::BackTeam;
pub use front::FrontTeam;
pub use optimise::OptimiseTeam;
pub use selection::{spawn_team, Selection};

use crate::battle::ai::{Action, Behavior, DefaultBehavior};
use crate::errors::{TeamError, TeamResult};
use crate::monster::MonsterInstance;
use crate::species::{Species, SpeciesTable};
use crate::stats::StatsMode;
use schema::Element;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Default maximum number of monsters in a team.
pub const TEAM_LIMIT: usize = 6;

/// The container policy a team is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamMode {
    /// Last in, first out
    Front,
    /// First in, first out
    Back,
    /// Highest sort key first
    Optimise,
}

impl FromStr for TeamMode {
    type Err = TeamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" => Ok(TeamMode::Front),
            "back" => Ok(TeamMode::Back),
            "optimise" | "optimize" => Ok(TeamMode::Optimise),
            other => Err(TeamError::InvalidConfiguration(format!(
                "unknown team mode '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for TeamMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The attribute an `Optimise` team orders its members by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    Hp,
    Attack,
    Defense,
    Speed,
    Level,
}

impl SortKey {
    /// Read this attribute off a monster. HP is the current HP.
    pub fn value_of(&self, monster: &MonsterInstance) -> i64 {
        match self {
            SortKey::Hp => monster.current_hp() as i64,
            SortKey::Attack => monster.attack() as i64,
            SortKey::Defense => monster.defense() as i64,
            SortKey::Speed => monster.speed() as i64,
            SortKey::Level => monster.level() as i64,
        }
    }
}

impl FromStr for SortKey {
    type Err = TeamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hp" => Ok(SortKey::Hp),
            "attack" => Ok(SortKey::Attack),
            "defense" | "defence" => Ok(SortKey::Defense),
            "speed" => Ok(SortKey::Speed),
            "level" => Ok(SortKey::Level),
            other => Err(TeamError::InvalidConfiguration(format!(
                "unknown sort key '{}'",
                other
            ))),
        }
    }
}

/// Capability shared by the three container policies.
///
/// `add` and `retrieve` leave the container untouched when they fail.
pub trait TeamContainer: fmt::Debug {
    /// Insert a monster according to the policy.
    fn add(&mut self, monster: MonsterInstance) -> TeamResult<()>;

    /// Remove the next monster according to the policy.
    fn retrieve(&mut self) -> TeamResult<MonsterInstance>;

    /// Policy-specific reorder used by the battle `Special` action.
    fn special(&mut self);

    fn len(&self) -> usize;

    fn capacity(&self) -> usize;

    /// Members in the order `retrieve` would hand them out.
    fn snapshot_order(&self) -> Vec<&MonsterInstance>;

    /// Drop every member and reset any orientation state.
    fn clear(&mut self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }
}

/// Construction parameters for a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamOptions {
    pub mode: TeamMode,
    pub sort_key: Option<SortKey>,
    pub stats_mode: StatsMode,
    pub limit: usize,
}

impl Default for TeamOptions {
    fn default() -> Self {
        Self {
            mode: TeamMode::Front,
            sort_key: None,
            stats_mode: StatsMode::Simple,
            limit: TEAM_LIMIT,
        }
    }
}

impl TeamOptions {
    pub fn new(mode: TeamMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_sort_key(mut self, sort_key: SortKey) -> Self {
        self.sort_key = Some(sort_key);
        self
    }

    pub fn with_stats_mode(mut self, stats_mode: StatsMode) -> Self {
        self.stats_mode = stats_mode;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Build the empty container these options describe.
    pub fn container(&self) -> TeamResult<Box<dyn TeamContainer>> {
        if self.limit == 0 {
            return Err(TeamError::InvalidConfiguration(
                "team limit must be at least 1".to_string(),
            ));
        }
        match (self.mode, self.sort_key) {
            (TeamMode::Front, _) => Ok(Box::new(FrontTeam::new(self.limit))),
            (TeamMode::Back, _) => Ok(Box::new(BackTeam::new(self.limit))),
            (TeamMode::Optimise, Some(key)) => Ok(Box::new(OptimiseTeam::new(key, self.limit))),
            (TeamMode::Optimise, None) => Err(TeamError::InvalidConfiguration(
                "optimise mode requires a sort key".to_string(),
            )),
        }
    }
}

/// A team of monsters: a live container plus the roster it was created
/// with, so it can be restored between bouts.
#[derive(Debug)]
pub struct MonsterTeam {
    options: TeamOptions,
    container: Box<dyn TeamContainer>,
    original: Vec<MonsterInstance>,
    behavior: Box<dyn Behavior>,
}

impl MonsterTeam {
    /// Create an empty team.
    pub fn new(options: TeamOptions) -> TeamResult<Self> {
        Ok(Self {
            container: options.container()?,
            options,
            original: Vec::new(),
            behavior: Box::new(DefaultBehavior),
        })
    }

    /// Create a team from monsters in insertion order. The monsters also
    /// become the roster that `regenerate` restores.
    pub fn from_monsters(options: TeamOptions, monsters: Vec<MonsterInstance>) -> TeamResult<Self> {
        if monsters.len() > options.limit {
            return Err(TeamError::InvalidConfiguration(format!(
                "{} monsters provided but the team limit is {}",
                monsters.len(),
                options.limit
            )));
        }
        let mut team = Self::new(options)?;
        for monster in monsters {
            team.original.push(monster.fresh_copy());
            team.container.add(monster)?;
        }
        Ok(team)
    }

    /// Create a team of fresh level-1 monsters of the given species, in
    /// order. Every species must be spawnable.
    pub fn from_species(
        options: TeamOptions,
        species: &[Species],
        table: &SpeciesTable,
    ) -> TeamResult<Self> {
        if species.len() > options.limit {
            return Err(TeamError::InvalidConfiguration(format!(
                "{} monsters provided but the team limit is {}",
                species.len(),
                options.limit
            )));
        }
        let mut monsters = Vec::with_capacity(species.len());
        for &id in species {
            let data = table.get(id).ok_or_else(|| {
                TeamError::InvalidConfiguration(format!("{} is not in the species table", id))
            })?;
            if !data.spawnable {
                return Err(TeamError::InvalidConfiguration(format!(
                    "{} cannot be spawned",
                    id
                )));
            }
            monsters.push(MonsterInstance::new(
                data.clone(),
                options.stats_mode,
                crate::monster::DEFAULT_LEVEL,
            ));
        }
        Self::from_monsters(options, monsters)
    }

    /// Replace the action policy used in battle.
    pub fn with_behavior(mut self, behavior: Box<dyn Behavior>) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn options(&self) -> TeamOptions {
        self.options
    }

    pub fn mode(&self) -> TeamMode {
        self.options.mode
    }

    pub fn limit(&self) -> usize {
        self.options.limit
    }

    pub fn add(&mut self, monster: MonsterInstance) -> TeamResult<()> {
        self.container.add(monster)
    }

    pub fn retrieve(&mut self) -> TeamResult<MonsterInstance> {
        self.container.retrieve()
    }

    pub fn special(&mut self) {
        self.container.special();
    }

    pub fn len(&self) -> usize {
        self.container.len()
    }

    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.container.is_full()
    }

    /// Live members in retrieval order.
    pub fn snapshot_order(&self) -> Vec<&MonsterInstance> {
        self.container.snapshot_order()
    }

    /// Species of the roster the team was created with, in insertion order.
    pub fn original_species(&self) -> Vec<Species> {
        self.original.iter().map(|monster| monster.species()).collect()
    }

    /// Elements present among the live members.
    pub fn elements(&self) -> BTreeSet<Element> {
        self.container
            .snapshot_order()
            .into_iter()
            .map(|monster| monster.element())
            .collect()
    }

    /// Elements present in the original roster.
    pub fn original_elements(&self) -> BTreeSet<Element> {
        self.original.iter().map(|monster| monster.element()).collect()
    }

    /// Restore the live container to fresh copies of the original roster.
    pub fn regenerate(&mut self) -> TeamResult<()> {
        self.container.clear();
        for monster in &self.original {
            self.container.add(monster.fresh_copy())?;
        }
        Ok(())
    }

    pub fn decide_action(&self, own: &MonsterInstance, enemy: &MonsterInstance) -> Action {
        self.behavior.decide_action(own, enemy)
    }
}

impl fmt::Display for MonsterTeam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} team [", self.options.mode)?;
        for (position, monster) in self.snapshot_order().into_iter().enumerate() {
            if position > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", monster)?;
        }
        write!(f, "]")
    }
}
