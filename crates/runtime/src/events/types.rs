//! Event types for different topics.

use game_core::{
    Action, ActionMenu, ActionResult, BattleOutcome, CombatantId, CombatantSnapshot, TurnSignal,
};
use serde::{Deserialize, Serialize};

/// Events related to turn management (lightweight).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    RoundStarted { round: u32 },
    /// A dead combatant's slot came up and was passed over.
    TurnSkipped { combatant: CombatantId },
    DefendExpired { combatant: CombatantId },
    TurnStarted { combatant: CombatantId, round: u32 },
    TurnEnded { combatant: CombatantId },
}

/// Events describing actions, for presentation layers to animate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionEvent {
    /// A provider chose an action; nothing has been applied yet.
    Declared { action: Action },

    /// The engine applied an action.
    Resolved { result: ActionResult },

    /// The engine refused an action; state is unchanged.
    Rejected { action: Action, reason: String },
}

/// Events exchanged with the external decision source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptEvent {
    /// The coordinator is suspended until a decision for `actor` arrives.
    AwaitingDecision { actor: CombatantId, menu: ActionMenu },

    /// The last decision was invalid; a new prompt follows.
    DecisionRejected { actor: CombatantId, reason: String },
}

/// Battle lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    Started {
        order: Vec<CombatantId>,
        players: Vec<CombatantSnapshot>,
        hostiles: Vec<CombatantSnapshot>,
    },
    Ended {
        outcome: BattleOutcome,
        forced: bool,
        rounds: u32,
    },
}

impl TurnEvent {
    /// Converts a scheduler signal into a turn event.
    ///
    /// `BattleEnded` is not a turn event; the runtime publishes it as a
    /// [`BattleEvent::Ended`] carrying the round count.
    pub fn from_signal(signal: &TurnSignal) -> Option<Self> {
        let event = match *signal {
            TurnSignal::RoundStarted { round } => TurnEvent::RoundStarted { round },
            TurnSignal::TurnSkipped { combatant } => TurnEvent::TurnSkipped { combatant },
            TurnSignal::DefendExpired { combatant } => TurnEvent::DefendExpired { combatant },
            TurnSignal::TurnStarted { combatant, round } => {
                TurnEvent::TurnStarted { combatant, round }
            }
            TurnSignal::TurnEnded { combatant } => TurnEvent::TurnEnded { combatant },
            TurnSignal::BattleEnded { .. } => return None,
        };
        Some(event)
    }
}
