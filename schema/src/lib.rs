// Monster Tower Schema - Shared type definitions
// This crate contains the static enums and data shapes shared between the
// simulator crate and the data files it embeds (species roster, element
// effectiveness table).

// Re-export the main types
pub use elements::*;
pub use formula::*;
pub use species::*;
pub use species_data::*;

pub mod elements;
pub mod formula;
pub mod species;
pub mod species_data;
