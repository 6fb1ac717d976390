//! Element-versus-element damage multipliers.
//!
//! The table is read once from RON (a list of element names plus a square
//! matrix of multipliers) and is read-only afterwards. Consumers borrow it;
//! nothing mutates it after construction.

use crate::errors::{DataError, DataResult};
use schema::Element;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static BUILTIN_EFFECTIVENESS: LazyLock<EffectivenessTable> = LazyLock::new(|| {
    EffectivenessTable::from_ron_str(include_str!("../data/type_effectiveness.ron"))
        .expect("embedded effectiveness table must be valid")
});

/// Multiplier used for pairings the table does not mention.
pub const NEUTRAL_EFFECTIVENESS: f64 = 1.0;

#[derive(Debug, Deserialize)]
struct RawEffectivenessTable {
    elements: Vec<String>,
    multipliers: Vec<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct EffectivenessTable {
    positions: HashMap<Element, usize>,
    values: Vec<f64>, // row-major, attacker rows
}

impl EffectivenessTable {
    /// Build a table from element names and a square matrix whose row `i`
    /// holds the multipliers of element `i` attacking every element.
    pub fn new(element_names: &[String], multipliers: Vec<Vec<f64>>) -> DataResult<Self> {
        let size = element_names.len();
        let mut positions = HashMap::with_capacity(size);
        for (position, name) in element_names.iter().enumerate() {
            let element =
                Element::from_name(name).ok_or_else(|| DataError::UnknownElement(name.clone()))?;
            if positions.insert(element, position).is_some() {
                return Err(DataError::MalformedTable(format!(
                    "element '{}' is listed twice",
                    name
                )));
            }
        }

        if multipliers.len() != size {
            return Err(DataError::MalformedTable(format!(
                "expected {} rows, found {}",
                size,
                multipliers.len()
            )));
        }

        let mut values = Vec::with_capacity(size * size);
        for (row_index, row) in multipliers.into_iter().enumerate() {
            if row.len() != size {
                return Err(DataError::MalformedTable(format!(
                    "row {} has {} entries, expected {}",
                    row_index,
                    row.len(),
                    size
                )));
            }
            if let Some(bad) = row.iter().find(|value| !value.is_finite() || **value < 0.0) {
                return Err(DataError::MalformedTable(format!(
                    "row {} contains invalid multiplier {}",
                    row_index, bad
                )));
            }
            values.extend(row);
        }

        Ok(Self { positions, values })
    }

    pub fn from_ron_str(source: &str) -> DataResult<Self> {
        let raw: RawEffectivenessTable = ron::from_str(source)?;
        Self::new(&raw.elements, raw.multipliers)
    }

    pub fn load(path: &Path) -> DataResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_ron_str(&content)
    }

    /// The table shipped with the simulator.
    pub fn builtin() -> &'static EffectivenessTable {
        &BUILTIN_EFFECTIVENESS
    }

    /// Multiplier for `attacker` hitting `defender`, if both are in the table.
    pub fn get(&self, attacker: Element, defender: Element) -> Option<f64> {
        let row = self.positions.get(&attacker)?;
        let column = self.positions.get(&defender)?;
        self.values.get(row * self.positions.len() + column).copied()
    }

    /// Multiplier for `attacker` hitting `defender`; neutral for elements the
    /// table does not list.
    pub fn effectiveness(&self, attacker: Element, defender: Element) -> f64 {
        self.get(attacker, defender).unwrap_or(NEUTRAL_EFFECTIVENESS)
    }
}
