use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, IntoEnumIterator};

/// Elemental typing of a species. Declaration order is the canonical order
/// used when elements are listed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter,
)]
pub enum Element {
    Fire,
    Water,
    Grass,
    Bug,
    Dragon,
    Electric,
    Fighting,
    Flying,
    Ghost,
    Ground,
    Ice,
    Normal,
    Poison,
    Psychic,
    Rock,
    Fairy,
    Dark,
    Steel,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Element {
    /// Case-insensitive lookup by name, e.g. `"ice"` or `"Ice"`.
    pub fn from_name(name: &str) -> Option<Element> {
        Element::iter().find(|element| element.to_string().eq_ignore_ascii_case(name.trim()))
    }

    pub fn all() -> Vec<Element> {
        Element::iter().collect()
    }
}
