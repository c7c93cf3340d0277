use super::CombatantId;

/// Terminal status of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    #[default]
    Undetermined,
    PlayerVictory,
    PlayerDefeat,
}

impl BattleOutcome {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, BattleOutcome::Undetermined)
    }
}

/// Turn sequencing state.
///
/// `order` is computed once when the battle starts. Dead combatants keep their
/// slot and are skipped whenever it comes up. Only the engine writes here.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Speed-sorted sequence of combatant ids.
    pub(crate) order: Vec<CombatantId>,

    /// Slot in `order` whose owner is acting (or about to act).
    pub(crate) index: usize,

    /// Round counter, starting at 1.
    pub(crate) round: u32,

    pub(crate) outcome: BattleOutcome,

    /// Number of actions resolved so far, including wasted and yielded turns.
    pub(crate) actions_resolved: u64,

    /// Whether the current slot's owner has already resolved its action.
    pub(crate) acted: bool,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            index: 0,
            round: 1,
            outcome: BattleOutcome::Undetermined,
            actions_resolved: 0,
            acted: false,
        }
    }

    /// Combatant owning the current slot, if the order has been initialized.
    pub fn current(&self) -> Option<CombatantId> {
        self.order.get(self.index).copied()
    }

    pub fn order(&self) -> &[CombatantId] {
        &self.order
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn outcome(&self) -> BattleOutcome {
        self.outcome
    }

    pub fn actions_resolved(&self) -> u64 {
        self.actions_resolved
    }

    pub fn has_acted(&self) -> bool {
        self.acted
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}
