//! Turn scheduling and action resolution.
//!
//! The [`BattleEngine`] is the authoritative reducer for [`BattleState`]. The
//! scheduler half (see `turns.rs`) decides whose turn it is; the resolver half
//! (`execute`) validates one action, spends mana, enumerates targets and applies
//! damage, healing or the defend stance.

mod errors;
mod signal;
mod turns;

pub use errors::TurnError;
pub use signal::{TurnSignal, TurnStep};

use rand::Rng;

use crate::action::{
    Action, ActionError, ActionKind, ActionResult, SkillKind, SkillRef, TargetEffect,
    resolve_targets, validate_action,
};
use crate::combat::{apply_attack, apply_heal};
use crate::state::{BattleState, CombatantId};

/// Battle engine borrowing the state it mutates.
///
/// All mutation is single-threaded and one action at a time; resolution of an
/// action is atomic with respect to the turn order.
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
}

impl<'a> BattleEngine<'a> {
    pub fn new(state: &'a mut BattleState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &BattleState {
        &*self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut BattleState {
        &mut *self.state
    }

    /// Validates and resolves `action` for the current turn owner.
    ///
    /// Each turn accepts exactly one action; a second one is rejected with
    /// [`ActionError::AlreadyActed`] until [`BattleEngine::next_turn`] runs.
    /// Rejected actions leave the state untouched. Mana is deducted before
    /// targets are enumerated, so a skill whose targets are all gone still
    /// costs its mana and is reported as `wasted`.
    pub fn execute<R: Rng + ?Sized>(
        &mut self,
        action: &Action,
        rng: &mut R,
    ) -> Result<ActionResult, ActionError> {
        validate_action(&*self.state, action)?;

        let result = match action.kind {
            ActionKind::BasicAttack => {
                let skill = self.actor_skill(action.actor, None)?;
                self.resolve_skill(action, &skill, None, 0, rng)
            }
            ActionKind::Skill { slot, target } => {
                let skill = self.actor_skill(action.actor, Some(slot))?;
                let cost = skill.mana_cost;
                self.resolve_skill(action, &skill, target, cost, rng)
            }
            ActionKind::Defend => self.resolve_defend(action),
            ActionKind::Yield => ActionResult::new(action.actor, action.kind),
        };

        self.state.turn.actions_resolved += 1;
        self.state.turn.acted = true;
        Ok(result)
    }

    fn actor_skill(&self, actor: CombatantId, slot: Option<usize>) -> Result<SkillRef, ActionError> {
        let combatant = self
            .state
            .combatant(actor)
            .ok_or(ActionError::ActorDead(actor))?;
        match slot {
            None => Ok(combatant.basic_skill().clone()),
            Some(slot) => combatant
                .skill(slot)
                .cloned()
                .ok_or(ActionError::UnknownSkillSlot { actor, slot }),
        }
    }

    fn resolve_skill<R: Rng + ?Sized>(
        &mut self,
        action: &Action,
        skill: &SkillRef,
        explicit: Option<CombatantId>,
        cost: u32,
        rng: &mut R,
    ) -> ActionResult {
        let mut result = ActionResult::new(action.actor, action.kind);
        result.skill = Some(skill.name.clone());

        let Some(actor) = self.state.combatant_mut(action.actor) else {
            return result;
        };
        result.mana_spent = actor.spend_mana(cost);
        let attack = actor.attack();
        let side = actor.side;

        let targets = match self.state.combatant(action.actor) {
            Some(actor) => resolve_targets(
                skill,
                actor,
                self.state.roster(side.opponent()),
                self.state.roster(side),
                explicit,
                rng,
            ),
            None => Vec::new(),
        };

        if targets.is_empty() {
            result.wasted = true;
            return result;
        }

        for target_id in targets {
            let Some(target) = self.state.combatant_mut(target_id) else {
                continue;
            };
            let effect = match skill.kind {
                SkillKind::Attack => apply_attack(attack, target, skill),
                SkillKind::Heal => apply_heal(target, skill),
                SkillKind::Buff | SkillKind::Debuff => TargetEffect::NoEffect { target: target_id },
            };
            result.effects.push(effect);
        }

        result
    }

    fn resolve_defend(&mut self, action: &Action) -> ActionResult {
        let mut result = ActionResult::new(action.actor, action.kind);
        if let Some(actor) = self.state.combatant_mut(action.actor)
            && actor.begin_defend()
        {
            result.effects.push(TargetEffect::Guard {
                target: action.actor,
                defense: actor.current_defense(),
            });
        }
        result
    }
}
