use crate::{Element, Formula, Species};
use serde::{Deserialize, Serialize};

/// Fixed stats used when a team plays in simple mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleStats {
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub max_hp: u32,
}

/// Level-dependent formulas used when a team plays in complex mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatFormulas {
    pub attack: Formula,
    pub defense: Formula,
    pub speed: Formula,
    pub max_hp: Formula,
}

impl From<SimpleStats> for StatFormulas {
    fn from(stats: SimpleStats) -> Self {
        Self {
            attack: Formula::constant(stats.attack),
            defense: Formula::constant(stats.defense),
            speed: Formula::constant(stats.speed),
            max_hp: Formula::constant(stats.max_hp),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub species: Species,
    pub element: Element,
    pub description: String,
    pub evolves_into: Option<Species>, // Next species in the chain
    pub spawnable: bool,               // Whether team selection may pick it
    pub simple_stats: SimpleStats,
    pub complex_stats: StatFormulas,
}
