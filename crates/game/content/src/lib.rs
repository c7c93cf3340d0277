//! Data-driven content definitions and loaders.
//!
//! This crate turns data files into the inputs a battle is spawned from:
//! - Skill catalogs (data-driven via RON)
//! - Encounters: one player-side roster and up to three hostiles (RON)
//! - Battle tunables (data-driven via TOML)
//!
//! All loaders use game-core types directly with serde for RON/TOML deserialization.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::SkillCatalog;

#[cfg(feature = "loaders")]
pub use loaders::{
    CombatantSpec, ConfigLoader, Encounter, EncounterLoader, EncounterSpec, LoadResult, SkillLoader,
    bundled_data_dir,
};
