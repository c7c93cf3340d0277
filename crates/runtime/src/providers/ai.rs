//! Weighted random AI for computer-controlled combatants.
//!
//! Each turn draws one uniform sample against the normalized
//! basic-attack/skill/defend weights. A skill draw picks uniformly among the
//! skills the combatant can afford and, for heals, would not overheal with;
//! with no such skill it falls back to the basic attack. Targets are left to
//! the engine's resolver, which picks uniformly among living candidates.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use game_core::{Action, ActionWeights, BattleState, Combatant, CombatantId, Skill};

use crate::api::{ActionProvider, Result};

/// Choice drawn from the weight table, before skill filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiChoice {
    BasicAttack,
    Skill,
    Defend,
}

impl AiChoice {
    /// Maps one uniform sample in `[0, 1)` onto normalized weights.
    pub fn from_sample(weights: &ActionWeights, sample: f32) -> Self {
        let weights = weights.normalized();
        if sample < weights.basic_attack {
            AiChoice::BasicAttack
        } else if sample < weights.basic_attack + weights.skill {
            AiChoice::Skill
        } else {
            AiChoice::Defend
        }
    }
}

/// Whether the AI would consider casting `skill` this turn.
fn is_candidate(actor: &Combatant, skill: &Skill) -> bool {
    actor.can_afford(skill) && (!skill.is_heal() || actor.health().missing() >= skill.power)
}

/// Picks one action for `actor`.
///
/// Yields when the actor is unknown or dead, or when no opponent is alive.
pub fn choose_action<R: Rng + ?Sized>(
    state: &BattleState,
    actor: CombatantId,
    weights: &ActionWeights,
    rng: &mut R,
) -> Action {
    let Some(combatant) = state.combatant(actor).filter(|c| c.is_alive()) else {
        return Action::yield_turn(actor);
    };
    if state.alive(combatant.side.opponent()).next().is_none() {
        return Action::yield_turn(actor);
    }

    match AiChoice::from_sample(weights, rng.r#gen::<f32>()) {
        AiChoice::BasicAttack => Action::basic_attack(actor),
        AiChoice::Skill => {
            let candidates: Vec<usize> = combatant
                .skills()
                .iter()
                .enumerate()
                .filter(|(_, skill)| is_candidate(combatant, skill))
                .map(|(slot, _)| slot)
                .collect();
            match candidates.choose(rng) {
                Some(&slot) => Action::skill(actor, slot, None),
                None => Action::basic_attack(actor),
            }
        }
        // The stance always expires at the start of the owner's turn, so this
        // guard only matters for hand-built states.
        AiChoice::Defend if combatant.is_defending() => Action::basic_attack(actor),
        AiChoice::Defend => Action::defend(actor),
    }
}

/// Weighted random provider with its own seeded generator.
pub struct WeightedAiProvider {
    weights: ActionWeights,
    rng: Mutex<ChaCha8Rng>,
}

impl WeightedAiProvider {
    pub fn new(weights: ActionWeights, seed: u64) -> Self {
        Self {
            weights,
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn weights(&self) -> ActionWeights {
        self.weights
    }
}

#[async_trait]
impl ActionProvider for WeightedAiProvider {
    async fn provide_action(&self, actor: CombatantId, state: &BattleState) -> Result<Action> {
        // A poisoned lock still holds a usable generator.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let action = choose_action(state, actor, &self.weights, &mut *rng);
        tracing::debug!(%actor, kind = %action.kind, "ai chose action");
        Ok(action)
    }
}
