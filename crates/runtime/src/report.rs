//! End-of-battle summary handed back to the caller.

use serde::{Deserialize, Serialize};

use game_core::{BattleOutcome, BattleState, CombatantSnapshot, Side};

/// Outcome plus final roster stats, for persisting back to the caller's
/// champion and monster records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    /// The battle was ended out of band rather than by a wiped roster.
    pub forced: bool,
    pub rounds: u32,
    pub actions_resolved: u64,
    pub players: Vec<CombatantSnapshot>,
    pub hostiles: Vec<CombatantSnapshot>,
}

impl BattleReport {
    pub fn from_state(state: &BattleState, forced: bool) -> Self {
        let snapshots = |side| -> Vec<CombatantSnapshot> {
            state.roster(side).iter().map(|c| c.to_snapshot()).collect()
        };
        Self {
            outcome: state.outcome(),
            forced,
            rounds: state.round(),
            actions_resolved: state.turn().actions_resolved(),
            players: snapshots(Side::Player),
            hostiles: snapshots(Side::Hostile),
        }
    }

    /// Pretty-printed JSON, for handing the result to external persistence.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Names of the combatants on `side` still standing.
    pub fn survivors(&self, side: Side) -> impl Iterator<Item = &str> {
        let roster = match side {
            Side::Player => &self.players,
            Side::Hostile => &self.hostiles,
        };
        roster
            .iter()
            .filter(|s| s.health.unwrap_or(s.max_health) > 0)
            .map(|s| s.name.as_str())
    }
}
