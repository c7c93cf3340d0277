//! Immutable skill definitions.
//!
//! Combatants share skills through [`Arc`] so a catalog can hand the same
//! definition to many combatants without copying it.

use std::sync::Arc;

/// Resolution family of a skill.
///
/// Only `Attack` and `Heal` change state. `Buff` and `Debuff` are accepted by
/// the engine and resolve to no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillKind {
    Attack,
    Heal,
    Buff,
    Debuff,
}

/// Which combatants a skill lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetRule {
    SingleHostile,
    AllHostiles,
    SelfOnly,
    SingleFriendly,
    AllFriendlies,
}

impl TargetRule {
    /// Returns true if the rule picks exactly one combatant from a roster.
    pub const fn is_single(self) -> bool {
        matches!(self, TargetRule::SingleHostile | TargetRule::SingleFriendly)
    }

    /// Returns true if the rule draws from the actor's own roster.
    pub const fn is_friendly(self) -> bool {
        matches!(
            self,
            TargetRule::SelfOnly | TargetRule::SingleFriendly | TargetRule::AllFriendlies
        )
    }
}

/// Skill definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub name: String,
    pub mana_cost: u32,
    pub kind: SkillKind,
    /// Additive power: damage before attack/defense for attacks, restored HP for heals.
    pub power: u32,
    pub target: TargetRule,
}

/// Shared handle to a skill definition.
pub type SkillRef = Arc<Skill>;

impl Skill {
    pub fn new(
        name: impl Into<String>,
        mana_cost: u32,
        kind: SkillKind,
        power: u32,
        target: TargetRule,
    ) -> Self {
        Self {
            name: name.into(),
            mana_cost,
            kind,
            power,
            target,
        }
    }

    /// Zero-cost single-target attack every combatant can fall back on.
    pub fn basic_attack(name: impl Into<String>, power: u32) -> Self {
        Self::new(name, 0, SkillKind::Attack, power, TargetRule::SingleHostile)
    }

    pub fn into_ref(self) -> SkillRef {
        Arc::new(self)
    }

    pub fn is_heal(&self) -> bool {
        self.kind == SkillKind::Heal
    }
}
