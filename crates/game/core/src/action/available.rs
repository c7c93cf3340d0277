//! Query of the actions a combatant may choose this turn.

use super::{SkillKind, TargetRule};
use crate::state::{BattleState, CombatantId};

/// One entry of the skill menu.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillOption {
    pub slot: usize,
    pub name: String,
    pub mana_cost: u32,
    pub kind: SkillKind,
    pub power: u32,
    pub target: TargetRule,
    pub affordable: bool,
}

/// Actions open to one combatant at the start of its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionMenu {
    pub actor: CombatantId,
    /// Always true; kept explicit for presentation layers.
    pub basic_attack: bool,
    pub skills: Vec<SkillOption>,
    pub defend: bool,
    /// Living members of the actor's roster (candidates for friendly targeting).
    pub allies: Vec<CombatantId>,
    /// Living members of the opposing roster.
    pub foes: Vec<CombatantId>,
}

impl ActionMenu {
    /// The skill menu is enabled only if at least one skill is affordable.
    pub fn skill_menu_enabled(&self) -> bool {
        self.skills.iter().any(|option| option.affordable)
    }

    pub fn skill(&self, slot: usize) -> Option<&SkillOption> {
        self.skills.get(slot)
    }
}

/// Builds the action menu for `actor`, or `None` if it is unknown.
pub fn available_actions(state: &BattleState, actor: CombatantId) -> Option<ActionMenu> {
    let combatant = state.combatant(actor)?;

    let skills = combatant
        .skills()
        .iter()
        .enumerate()
        .map(|(slot, skill)| SkillOption {
            slot,
            name: skill.name.clone(),
            mana_cost: skill.mana_cost,
            kind: skill.kind,
            power: skill.power,
            target: skill.target,
            affordable: combatant.can_afford(skill),
        })
        .collect();

    Some(ActionMenu {
        actor,
        basic_attack: true,
        skills,
        defend: !combatant.is_defending(),
        allies: state.alive(combatant.side).map(|c| c.id).collect(),
        foes: state.alive(combatant.side.opponent()).map(|c| c.id).collect(),
    })
}
