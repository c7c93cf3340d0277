//! Skill catalog keyed by content id.

use std::collections::BTreeMap;

use game_core::SkillRef;

/// Skills available to encounter files, looked up by id.
///
/// Definitions are shared: every combatant referencing the same id holds the
/// same [`SkillRef`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkillCatalog {
    skills: BTreeMap<String, SkillRef>,
}

impl SkillCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a skill, returning the definition it replaced.
    pub fn insert(&mut self, id: impl Into<String>, skill: SkillRef) -> Option<SkillRef> {
        self.skills.insert(id.into(), skill)
    }

    pub fn get(&self, id: &str) -> Option<SkillRef> {
        self.skills.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.skills.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.skills.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use game_core::Skill;

    use super::*;

    #[test]
    fn lookups_share_the_definition() {
        let mut catalog = SkillCatalog::new();
        catalog.insert("strike", Skill::basic_attack("Strike", 2).into_ref());

        let a = catalog.get("strike").unwrap();
        let b = catalog.get("strike").unwrap();
        assert!(std::sync::Arc::ptr_eq(&a, &b));
        assert!(catalog.get("missing").is_none());
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["strike"]);
    }
}
