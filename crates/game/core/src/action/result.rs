use super::ActionKind;
use crate::state::CombatantId;

/// Effect of a resolved action on one combatant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetEffect {
    Damage {
        target: CombatantId,
        amount: u32,
        remaining: u32,
        defeated: bool,
    },
    Heal {
        target: CombatantId,
        amount: u32,
        remaining: u32,
    },
    /// Defense raised by the defend action.
    Guard { target: CombatantId, defense: u32 },
    /// Target was hit by a skill that has no resolution rule (buff/debuff).
    NoEffect { target: CombatantId },
}

impl TargetEffect {
    pub fn target(&self) -> CombatantId {
        match self {
            Self::Damage { target, .. }
            | Self::Heal { target, .. }
            | Self::Guard { target, .. }
            | Self::NoEffect { target } => *target,
        }
    }
}

/// Description of one resolved action, for presentation layers to animate.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionResult {
    pub actor: CombatantId,
    pub kind: ActionKind,
    /// Name of the skill used, if any.
    pub skill: Option<String>,
    pub mana_spent: u32,
    pub effects: Vec<TargetEffect>,
    /// Mana was spent but no target was left to receive the skill.
    pub wasted: bool,
}

impl ActionResult {
    pub(crate) fn new(actor: CombatantId, kind: ActionKind) -> Self {
        Self {
            actor,
            kind,
            skill: None,
            mana_spent: 0,
            effects: Vec::new(),
            wasted: false,
        }
    }

    /// Total damage dealt across all targets.
    pub fn total_damage(&self) -> u32 {
        self.effects
            .iter()
            .map(|effect| match effect {
                TargetEffect::Damage { amount, .. } => *amount,
                _ => 0,
            })
            .sum()
    }

    /// Total health restored across all targets.
    pub fn total_healing(&self) -> u32 {
        self.effects
            .iter()
            .map(|effect| match effect {
                TargetEffect::Heal { amount, .. } => *amount,
                _ => 0,
            })
            .sum()
    }

    pub fn defeated(&self) -> impl Iterator<Item = CombatantId> + '_ {
        self.effects.iter().filter_map(|effect| match effect {
            TargetEffect::Damage {
                target,
                defeated: true,
                ..
            } => Some(*target),
            _ => None,
        })
    }
}
