//! Skill catalog loader.

use std::path::Path;

use game_core::Skill;

use crate::catalog::SkillCatalog;
use crate::loaders::{LoadResult, read_file};

/// Loader for skill catalogs from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load a skill catalog from a RON file.
    ///
    /// RON format: `Vec<(String, Skill)>`, the string being the id encounter
    /// files refer to. Duplicate ids are rejected.
    pub fn load(path: &Path) -> LoadResult<SkillCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SkillCatalog> {
        let raw: Vec<(String, Skill)> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        let mut catalog = SkillCatalog::new();
        for (id, skill) in raw {
            if catalog.insert(id.clone(), skill.into_ref()).is_some() {
                anyhow::bail!("Duplicate skill id '{}' in catalog", id);
            }
        }

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use game_core::{SkillKind, TargetRule};

    use super::*;
    use crate::loaders::test_support::temp_file;

    const SKILLS: &str = r#"[
        ("strike", (name: "Strike", mana_cost: 0, kind: Attack, power: 0, target: SingleHostile)),
        ("mend", (name: "Mend", mana_cost: 6, kind: Heal, power: 25, target: SelfOnly)),
        ("quake", (name: "Quake", mana_cost: 12, kind: Attack, power: 15, target: AllHostiles)),
    ]"#;

    #[test]
    fn loads_skills_by_id() {
        let file = temp_file(SKILLS);
        let catalog = SkillLoader::load(file.path()).unwrap();

        assert_eq!(catalog.len(), 3);
        let mend = catalog.get("mend").unwrap();
        assert_eq!(mend.kind, SkillKind::Heal);
        assert_eq!(mend.power, 25);
        assert_eq!(catalog.get("quake").unwrap().target, TargetRule::AllHostiles);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = SkillLoader::parse(
            r#"[
                ("strike", (name: "Strike", mana_cost: 0, kind: Attack, power: 0, target: SingleHostile)),
                ("strike", (name: "Strike", mana_cost: 0, kind: Attack, power: 1, target: SingleHostile)),
            ]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate skill id 'strike'"));
    }

    #[test]
    fn malformed_ron_is_an_error() {
        let err = SkillLoader::parse("[(\"strike\", (name: \"Strike\"))]").unwrap_err();
        assert!(err.to_string().contains("Failed to parse skill catalog RON"));
    }
}
