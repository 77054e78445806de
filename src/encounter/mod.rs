//! Encounter waves: templates, spawning, defeat rewards, and loot

pub mod director;
pub mod loot;
pub mod template;

pub use director::EncounterDirector;
pub use loot::{DropEntry, DropKind, LootOutcome};
pub use template::{EncounterTables, EncounterTemplate, EnemyDefinition};
