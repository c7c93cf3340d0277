//! Pre-resolution checks shared by the engine and the actors.
//!
//! Validation never mutates state, so external decision sources can be
//! checked (and re-prompted) before an action reaches the engine.

use super::{Action, ActionError, ActionKind};
use crate::error::ErrorContext;
use crate::state::BattleState;

/// Checks that `action` may be executed right now.
pub fn validate_action(state: &BattleState, action: &Action) -> Result<(), ActionError> {
    if state.is_terminal() {
        return Err(ActionError::BattleOver);
    }

    let expected = state.current_actor();
    if expected != Some(action.actor) {
        return Err(ActionError::ActorNotCurrent {
            provided: action.actor,
            expected,
        });
    }

    if state.turn().has_acted() {
        return Err(ActionError::AlreadyActed(action.actor));
    }

    let actor = state
        .combatant(action.actor)
        .ok_or(ActionError::ActorNotCurrent {
            provided: action.actor,
            expected,
        })?;
    if !actor.is_alive() {
        return Err(ActionError::ActorDead(action.actor));
    }

    let context = || ErrorContext::new(state.round()).with_actor(action.actor);

    match action.kind {
        ActionKind::BasicAttack | ActionKind::Yield => Ok(()),
        ActionKind::Defend => {
            if actor.is_defending() {
                return Err(ActionError::AlreadyDefending { context: context() });
            }
            Ok(())
        }
        ActionKind::Skill { slot, target } => {
            let skill = actor.skill(slot).ok_or(ActionError::UnknownSkillSlot {
                actor: action.actor,
                slot,
            })?;

            if !actor.can_afford(skill) {
                return Err(ActionError::InsufficientMana {
                    required: skill.mana_cost,
                    available: actor.mana().current,
                    context: context(),
                });
            }

            // A single-ally heal aimed at a corpse is refused before any mana
            // is spent. Other heal rules ignore the explicit target.
            if skill.is_heal()
                && skill.target.is_single()
                && skill.target.is_friendly()
                && let Some(target) = target
                && state.combatant(target).is_some_and(|c| !c.is_alive())
            {
                return Err(ActionError::HealTargetDead {
                    target,
                    context: context().with_message("heal target died before resolution"),
                });
            }

            Ok(())
        }
    }
}
