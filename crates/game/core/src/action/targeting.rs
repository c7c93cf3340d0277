//! Target enumeration for skills.
//!
//! Target sets are computed from the rosters at resolution time:
//! - `SingleHostile` / `SingleFriendly`: one living combatant, the explicit
//!   choice if it is a living member of the right roster, otherwise uniform random
//! - `AllHostiles` / `AllFriendlies`: every living member of the roster
//! - `SelfOnly`: the actor
//!
//! An empty result means nothing was left to target; callers treat that as a
//! wasted action rather than an error.

use rand::Rng;
use rand::seq::SliceRandom;

use super::{Skill, TargetRule};
use crate::state::{Combatant, CombatantId};

/// Computes the combatants a skill lands on.
///
/// `opposing` and `friendly` are the rosters as seen from the actor's side.
pub fn resolve_targets<R: Rng + ?Sized>(
    skill: &Skill,
    actor: &Combatant,
    opposing: &[Combatant],
    friendly: &[Combatant],
    explicit: Option<CombatantId>,
    rng: &mut R,
) -> Vec<CombatantId> {
    match skill.target {
        TargetRule::SelfOnly => vec![actor.id],
        TargetRule::AllHostiles => living(opposing).collect(),
        TargetRule::AllFriendlies => living(friendly).collect(),
        TargetRule::SingleHostile => pick_one(opposing, explicit, rng).into_iter().collect(),
        TargetRule::SingleFriendly => pick_one(friendly, explicit, rng).into_iter().collect(),
    }
}

fn living(roster: &[Combatant]) -> impl Iterator<Item = CombatantId> + '_ {
    roster.iter().filter(|c| c.is_alive()).map(|c| c.id)
}

fn pick_one<R: Rng + ?Sized>(
    roster: &[Combatant],
    explicit: Option<CombatantId>,
    rng: &mut R,
) -> Option<CombatantId> {
    let candidates: Vec<CombatantId> = living(roster).collect();

    if let Some(chosen) = explicit
        && candidates.contains(&chosen)
    {
        return Some(chosen);
    }

    candidates.choose(rng).copied()
}
