//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the engine, the action providers and channel plumbing
//! so clients can bubble them up with consistent context.
use std::fmt;

use thiserror::Error;

use game_core::{BattleOutcome, CombatantId, InitializationError, StateError, TurnError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{kind} action provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error("decision channel closed while waiting for {actor}")]
    DecisionChannelClosed { actor: CombatantId },

    #[error("decision queue closed; the battle no longer accepts decisions")]
    DecisionQueueClosed,

    #[error("battle command channel closed")]
    CommandChannelClosed,

    #[error("combatant {0} not found")]
    UnknownCombatant(CombatantId),

    #[error("cannot force a battle to end with non-terminal outcome {0}")]
    NonTerminalOutcome(BattleOutcome),

    #[error("failed to spawn battle")]
    Initialization(#[from] InitializationError),

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    State(#[from] StateError),
}

/// Family of action provider driving a combatant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Computer-controlled decisions made inside the engine.
    Ai,
    /// Decisions delivered from outside the engine (player input).
    Interactive,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Ai => "ai",
            ProviderKind::Interactive => "interactive",
        };
        write!(f, "{}", label)
    }
}
