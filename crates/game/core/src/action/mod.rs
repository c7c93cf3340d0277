//! Action vocabulary shared by every kind of actor.
//!
//! Autonomous and externally driven combatants choose from the same
//! [`ActionKind`] set; the engine validates and resolves both identically.

mod available;
mod error;
mod result;
mod skill;
mod targeting;
mod validation;

pub use available::{ActionMenu, SkillOption, available_actions};
pub use error::ActionError;
pub use result::{ActionResult, TargetEffect};
pub use skill::{Skill, SkillKind, SkillRef, TargetRule};
pub use targeting::resolve_targets;
pub use validation::validate_action;

use crate::state::CombatantId;

/// What a combatant does with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    /// Use the always-available, zero-cost basic skill.
    BasicAttack,

    /// Use the skill in `slot` of the combatant's skill list.
    ///
    /// `target` is only consulted for single-target rules; when absent (or no
    /// longer alive) the target is picked at random.
    Skill {
        slot: usize,
        target: Option<CombatantId>,
    },

    /// Double defense until the start of the combatant's next turn.
    Defend,

    /// Give up the turn without acting.
    Yield,
}

/// Action issued by one combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub actor: CombatantId,
    pub kind: ActionKind,
}

impl Action {
    pub fn new(actor: CombatantId, kind: ActionKind) -> Self {
        Self { actor, kind }
    }

    pub fn basic_attack(actor: CombatantId) -> Self {
        Self::new(actor, ActionKind::BasicAttack)
    }

    pub fn skill(actor: CombatantId, slot: usize, target: Option<CombatantId>) -> Self {
        Self::new(actor, ActionKind::Skill { slot, target })
    }

    pub fn defend(actor: CombatantId) -> Self {
        Self::new(actor, ActionKind::Defend)
    }

    pub fn yield_turn(actor: CombatantId) -> Self {
        Self::new(actor, ActionKind::Yield)
    }
}
