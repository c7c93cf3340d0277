//! Asynchronous abstraction for sourcing combatant intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so a battle can
//! run with human input, the weighted AI, or scripted fixtures.
use async_trait::async_trait;
use game_core::{Action, BattleState, CombatantId};

use super::errors::Result;

/// Trait for providing an action for the combatant whose turn it is.
///
/// Implementations may suspend for as long as they like; the battle loop
/// keeps every other turn on hold until the returned future resolves or the
/// battle is force-ended, in which case the future is dropped unresolved.
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// # Arguments
    /// * `actor` - The combatant that needs to act
    /// * `state` - Read-only view of the battle, frozen for the duration of the call
    async fn provide_action(&self, actor: CombatantId, state: &BattleState) -> Result<Action>;
}

/// A provider that always uses the basic attack.
/// Useful for testing or as a fallback.
pub struct BasicAttackProvider;

#[async_trait]
impl ActionProvider for BasicAttackProvider {
    async fn provide_action(&self, actor: CombatantId, _state: &BattleState) -> Result<Action> {
        Ok(Action::basic_attack(actor))
    }
}
