use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// Every monster species known to the simulator, in roster order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter)]
pub enum Species {
    Flamikin,
    Infernoth,
    Infernox,
    Aquariuma,
    Marititan,
    Leviatitan,
    Vineon,
    Treetower,
    Treemendous,
    Rockodile,
    Stonemountain,
    Gustwing,
    Stormeagle,
    Frostbite,
    Blizzarus,
    Thundrake,
    Thunderdrake,
    Shadowcat,
    Nightpanther,
    Mystifly,
    Telekite,
    Metalhorn,
    Ironclad,
    Normake,
    Strikeon,
    Venomcoil,
    Pythondra,
    Constriclaw,
    Shockserpent,
    Driftsnake,
    Aquanake,
    Flameserpent,
    Leafadder,
    Iceviper,
    Rockpython,
    Soundcobra,
    Psychosnake,
    Groundviper,
    Faeboa,
    Bugrattler,
    Darkadder,
}

impl Species {
    /// Display name of the species. Variant names double as display names.
    pub fn name(&self) -> String {
        format!("{:?}", self)
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
