//! Errors raised while spawning or mutating battle state.

use crate::error::{ErrorContext, ErrorSeverity, GameError};

use super::{BattleOutcome, CombatantId};

/// Spawn boundary failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InitializationError {
    #[error("battle requires at least one player-side combatant")]
    EmptyPlayerRoster,

    #[error("too many hostile combatants: {count} (max {max})")]
    TooManyHostiles { count: usize, max: usize },
}

impl GameError for InitializationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyPlayerRoster => "INIT_EMPTY_PLAYER_ROSTER",
            Self::TooManyHostiles { .. } => "INIT_TOO_MANY_HOSTILES",
        }
    }
}

/// Failures of the end-of-battle synchronization calls.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("battle has not reached a terminal outcome (currently {outcome})")]
    NotTerminal {
        outcome: BattleOutcome,
        context: ErrorContext,
    },

    #[error("combatant {0} not found")]
    UnknownCombatant(CombatantId),
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotTerminal { .. } => ErrorSeverity::Validation,
            Self::UnknownCombatant(_) => ErrorSeverity::Validation,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::NotTerminal { context, .. } => Some(context),
            Self::UnknownCombatant(_) => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotTerminal { .. } => "STATE_NOT_TERMINAL",
            Self::UnknownCombatant(_) => "STATE_UNKNOWN_COMBATANT",
        }
    }
}
