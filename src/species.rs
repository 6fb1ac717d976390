use crate::errors::{DataError, DataResult, MonsterError};
use crate::stats::{Stats, StatsMode};
use schema::SpeciesData;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::{Arc, LazyLock};

// Re-export the Species enum from the schema crate
pub use schema::Species;

// Built-in roster, parsed once on first use.
static BUILTIN_SPECIES: LazyLock<SpeciesTable> = LazyLock::new(|| {
    SpeciesTable::from_ron_str(include_str!("../data/species.ron"))
        .expect("embedded species roster must be valid")
});

/// Data-driven species table: species id to element, stats, evolution target
/// and spawnable flag. Entries keep the order they were declared in.
#[derive(Debug, Clone)]
pub struct SpeciesTable {
    entries: Vec<Arc<SpeciesData>>,
    index: HashMap<Species, usize>,
}

impl SpeciesTable {
    /// Build a table, rejecting duplicate species and evolution targets that
    /// have no entry of their own.
    pub fn new(entries: Vec<SpeciesData>) -> DataResult<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, data) in entries.iter().enumerate() {
            if index.insert(data.species, position).is_some() {
                return Err(DataError::DuplicateSpecies(data.species));
            }
        }

        for data in &entries {
            if let Some(into) = data.evolves_into {
                if !index.contains_key(&into) {
                    return Err(DataError::DanglingEvolution {
                        from: data.species,
                        into,
                    });
                }
            }
        }

        Ok(Self {
            entries: entries.into_iter().map(Arc::new).collect(),
            index,
        })
    }

    pub fn from_ron_str(source: &str) -> DataResult<Self> {
        let entries: Vec<SpeciesData> = ron::from_str(source)?;
        Self::new(entries)
    }

    /// Load a roster from a RON file on disk
    pub fn load(path: &Path) -> DataResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }

    /// The roster shipped with the simulator.
    pub fn builtin() -> &'static SpeciesTable {
        &BUILTIN_SPECIES
    }

    pub fn get(&self, species: Species) -> Option<&Arc<SpeciesData>> {
        self.index.get(&species).map(|&position| &self.entries[position])
    }

    /// Like `get`, but reports a missing entry as an error and hands out a
    /// shared handle for a monster instance to keep.
    pub fn lookup(&self, species: Species) -> Result<Arc<SpeciesData>, MonsterError> {
        self.get(species)
            .cloned()
            .ok_or(MonsterError::SpeciesNotFound(species))
    }

    /// Stats of `species` at `level`, or None if the species is unknown.
    pub fn stats_at_level(&self, species: Species, mode: StatsMode, level: u32) -> Option<Stats> {
        self.get(species).map(|data| Stats::at_level(data, mode, level))
    }

    /// All species that team selection is allowed to pick, in roster order.
    pub fn list_spawnable_species(&self) -> Vec<Species> {
        self.entries
            .iter()
            .filter(|data| data.spawnable)
            .map(|data| data.species)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<SpeciesData>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Display detailed information about a species including stats and description
pub fn display_species_detailed(data: &SpeciesData, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // --- 1. Name and spawnability ---
    let marker = if data.spawnable { "spawnable" } else { "evolution only" };
    writeln!(f, "{} ({})", data.species.name(), marker)?;
    writeln!(f, "--------------------")?;

    // --- 2. Description ---
    writeln!(f, "{}", data.description)?;
    writeln!(f, "--------------------")?;

    // --- 3. Element and evolution ---
    writeln!(f, "Element: {}", data.element)?;
    match data.evolves_into {
        Some(next) => writeln!(f, "Evolves into: {}", next)?,
        None => writeln!(f, "Evolves into: -")?,
    }
    writeln!(f, "--------------------")?;

    // --- 4. Simple Stats ---
    writeln!(f, "Simple Stats:")?;
    let stats = &data.simple_stats;
    const LABEL_WIDTH: usize = 12;

    writeln!(f, "{:<LABEL_WIDTH$} : {}", "HP", stats.max_hp)?;
    writeln!(f, "{:<LABEL_WIDTH$} : {}", "Attack", stats.attack)?;
    writeln!(f, "{:<LABEL_WIDTH$} : {}", "Defense", stats.defense)?;
    write!(f, "{:<LABEL_WIDTH$} : {}", "Speed", stats.speed)
}

/// Wrapper that renders a species with `display_species_detailed`.
pub struct SpeciesCard<'a>(pub &'a SpeciesData);

impl fmt::Display for SpeciesCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_species_detailed(self.0, f)
    }
}
