//! Encounter loader.
//!
//! An encounter names the combatants of one battle. Skills are referenced by
//! catalog id and resolved at load time, so a typo fails the load instead of
//! the battle.

use std::path::Path;

use game_core::{CombatantSnapshot, SkillRef};
use serde::{Deserialize, Serialize};

use crate::catalog::SkillCatalog;
use crate::loaders::{LoadResult, read_file};

/// One combatant as written in an encounter file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantSpec {
    pub name: String,
    pub max_health: u32,
    #[serde(default)]
    pub health: Option<u32>,
    #[serde(default)]
    pub max_mana: u32,
    #[serde(default)]
    pub mana: Option<u32>,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    /// Catalog id of the zero-cost basic skill.
    pub basic_skill: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl CombatantSpec {
    /// Resolves skill ids against `catalog`.
    pub fn resolve(&self, catalog: &SkillCatalog) -> LoadResult<CombatantSnapshot> {
        let lookup = |id: &str| -> LoadResult<SkillRef> {
            catalog.get(id).ok_or_else(|| {
                anyhow::anyhow!("Unknown skill id '{}' for combatant '{}'", id, self.name)
            })
        };

        let basic_skill = lookup(&self.basic_skill)?;
        let skills = self
            .skills
            .iter()
            .map(|id| lookup(id))
            .collect::<LoadResult<Vec<_>>>()?;

        Ok(CombatantSnapshot {
            name: self.name.clone(),
            max_health: self.max_health,
            health: self.health,
            max_mana: self.max_mana,
            mana: self.mana,
            attack: self.attack,
            defense: self.defense,
            speed: self.speed,
            basic_skill,
            skills,
        })
    }
}

/// Encounter file layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterSpec {
    pub player: CombatantSpec,
    /// Extra player-side combatants fighting alongside the champion.
    #[serde(default)]
    pub allies: Vec<CombatantSpec>,
    #[serde(default)]
    pub hostiles: Vec<CombatantSpec>,
}

/// Encounter with every skill resolved, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encounter {
    /// Player-side roster, champion first.
    pub players: Vec<CombatantSnapshot>,
    pub hostiles: Vec<CombatantSnapshot>,
}

/// Loader for encounters from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    /// Load an encounter from a RON file, resolving skills against `catalog`.
    ///
    /// The hostile count is not checked here; spawning enforces the
    /// configured limit.
    pub fn load(path: &Path, catalog: &SkillCatalog) -> LoadResult<Encounter> {
        let content = read_file(path)?;
        Self::parse(&content, catalog)
            .map_err(|e| anyhow::anyhow!("Invalid encounter {}: {}", path.display(), e))
    }

    pub fn parse(content: &str, catalog: &SkillCatalog) -> LoadResult<Encounter> {
        let spec: EncounterSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))?;

        let players = std::iter::once(&spec.player)
            .chain(&spec.allies)
            .map(|c| c.resolve(catalog))
            .collect::<LoadResult<Vec<_>>>()?;
        let hostiles = spec
            .hostiles
            .iter()
            .map(|c| c.resolve(catalog))
            .collect::<LoadResult<Vec<_>>>()?;

        Ok(Encounter { players, hostiles })
    }
}
