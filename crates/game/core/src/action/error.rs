use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::CombatantId;

/// Reasons an action is rejected before any state changes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("battle is already over")]
    BattleOver,

    #[error("combatant {provided} acted out of turn (current turn belongs to {expected:?})")]
    ActorNotCurrent {
        provided: CombatantId,
        expected: Option<CombatantId>,
    },

    #[error("combatant {0} has already acted this turn")]
    AlreadyActed(CombatantId),

    #[error("combatant {0} is dead")]
    ActorDead(CombatantId),

    #[error("combatant {actor} has no skill in slot {slot}")]
    UnknownSkillSlot { actor: CombatantId, slot: usize },

    #[error("insufficient mana: requires {required}, has {available}")]
    InsufficientMana {
        required: u32,
        available: u32,
        context: ErrorContext,
    },

    #[error("combatant is already defending")]
    AlreadyDefending { context: ErrorContext },

    #[error("heal target {target} is dead")]
    HealTargetDead {
        target: CombatantId,
        context: ErrorContext,
    },
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientMana { .. }
            | Self::AlreadyDefending { .. }
            | Self::HealTargetDead { .. } => ErrorSeverity::Recoverable,
            Self::BattleOver
            | Self::ActorNotCurrent { .. }
            | Self::AlreadyActed(_)
            | Self::ActorDead(_)
            | Self::UnknownSkillSlot { .. } => ErrorSeverity::Validation,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::InsufficientMana { context, .. }
            | Self::AlreadyDefending { context }
            | Self::HealTargetDead { context, .. } => Some(context),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BattleOver => "ACTION_BATTLE_OVER",
            Self::ActorNotCurrent { .. } => "ACTION_ACTOR_NOT_CURRENT",
            Self::AlreadyActed(_) => "ACTION_ALREADY_ACTED",
            Self::ActorDead(_) => "ACTION_ACTOR_DEAD",
            Self::UnknownSkillSlot { .. } => "ACTION_UNKNOWN_SKILL_SLOT",
            Self::InsufficientMana { .. } => "ACTION_INSUFFICIENT_MANA",
            Self::AlreadyDefending { .. } => "ACTION_ALREADY_DEFENDING",
            Self::HealTargetDead { .. } => "ACTION_HEAL_TARGET_DEAD",
        }
    }
}
