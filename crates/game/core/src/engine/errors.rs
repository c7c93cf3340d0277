//! Error types for turn scheduling.

use crate::error::{ErrorSeverity, GameError};
use crate::state::BattleOutcome;

/// Errors that can occur during turn operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("no living combatants to schedule")]
    NoLivingCombatants,

    #[error("turn order already initialized")]
    AlreadyInitialized,

    #[error("cannot force a battle to end with non-terminal outcome {0}")]
    NonTerminalOutcome(BattleOutcome),
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoLivingCombatants => ErrorSeverity::Validation,
            Self::AlreadyInitialized => ErrorSeverity::Internal,
            Self::NonTerminalOutcome(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoLivingCombatants => "TURN_NO_LIVING_COMBATANTS",
            Self::AlreadyInitialized => "TURN_ALREADY_INITIALIZED",
            Self::NonTerminalOutcome(_) => "TURN_NON_TERMINAL_OUTCOME",
        }
    }
}
