use crate::errors::TeamError;
use schema::{Formula, SpeciesData};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which stat source a monster reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatsMode {
    /// Fixed per-species stats that ignore level
    #[default]
    Simple,
    /// Per-species formulas evaluated at the monster's level
    Complex,
}

impl FromStr for StatsMode {
    type Err = TeamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(StatsMode::Simple),
            "complex" => Ok(StatsMode::Complex),
            other => Err(TeamError::InvalidConfiguration(format!(
                "unknown stats mode '{}'",
                other
            ))),
        }
    }
}

/// The numeric stat block of a monster at a given level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub max_hp: u32,
}

impl Stats {
    /// Compute the stats of a species at `level`.
    pub fn at_level(data: &SpeciesData, mode: StatsMode, level: u32) -> Self {
        match mode {
            StatsMode::Simple => Stats {
                attack: data.simple_stats.attack,
                defense: data.simple_stats.defense,
                speed: data.simple_stats.speed,
                max_hp: data.simple_stats.max_hp,
            },
            StatsMode::Complex => {
                let formulas = &data.complex_stats;
                Stats {
                    attack: evaluate_stat(&formulas.attack, level),
                    defense: evaluate_stat(&formulas.defense, level),
                    speed: evaluate_stat(&formulas.speed, level),
                    max_hp: evaluate_stat(&formulas.max_hp, level).max(1),
                }
            }
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ATK:{} DEF:{} SPD:{} HP:{}",
            self.attack, self.defense, self.speed, self.max_hp
        )
    }
}

// Negative formula results clamp to zero.
fn evaluate_stat(formula: &Formula, level: u32) -> u32 {
    formula.evaluate(level).clamp(0, u32::MAX as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::{Species, SpeciesTable};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_simple_stats_ignore_level() {
        let data = SpeciesTable::builtin().get(Species::Flamikin).unwrap();
        let at_one = Stats::at_level(data, StatsMode::Simple, 1);
        let at_ten = Stats::at_level(data, StatsMode::Simple, 10);
        assert_eq!(at_one, at_ten);
        assert_eq!(at_one.attack, data.simple_stats.attack);
    }

    #[test]
    fn test_complex_stats_grow_with_level() {
        let data = SpeciesTable::builtin().get(Species::Flamikin).unwrap();
        let at_one = Stats::at_level(data, StatsMode::Complex, 1);
        let at_nine = Stats::at_level(data, StatsMode::Complex, 9);
        assert!(at_nine.attack > at_one.attack);
        assert!(at_nine.max_hp > at_one.max_hp);
    }

    #[test]
    fn test_stats_mode_from_str() {
        assert_eq!("Complex".parse::<StatsMode>(), Ok(StatsMode::Complex));
        assert_eq!("simple".parse::<StatsMode>(), Ok(StatsMode::Simple));
        assert!(matches!(
            "hard".parse::<StatsMode>(),
            Err(TeamError::InvalidConfiguration(_))
        ));
    }
}
