use crate::state::{BattleOutcome, CombatantId};

/// Lifecycle notification produced by the turn scheduler.
///
/// The engine returns signals instead of calling observers so it stays free of
/// I/O; the runtime forwards them to its event bus in order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnSignal {
    /// A new round began (turn index wrapped back to zero).
    RoundStarted { round: u32 },

    /// A dead combatant's slot came up and was passed over.
    TurnSkipped { combatant: CombatantId },

    /// The combatant's defend stance ran out at the start of its turn.
    DefendExpired { combatant: CombatantId },

    /// The combatant is now expected to act.
    TurnStarted { combatant: CombatantId, round: u32 },

    /// The combatant finished acting.
    TurnEnded { combatant: CombatantId },

    BattleEnded { outcome: BattleOutcome, forced: bool },
}

/// Result of a scheduler transition.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TurnStep {
    /// Notifications, in the order they happened.
    pub signals: Vec<TurnSignal>,

    /// Combatant that must act next; `None` once the battle has ended.
    pub actor: Option<CombatantId>,
}

impl TurnStep {
    pub fn is_battle_over(&self) -> bool {
        self.actor.is_none()
    }
}
