//! Plain-text rendering of battle events.

use std::collections::HashMap;
use std::fmt::Write;

use game_core::{ActionMenu, CombatantId, TargetEffect};
use runtime::{ActionEvent, BattleEvent, Event, PromptEvent, TurnEvent};

/// Turns ids into names for display.
pub struct Presenter {
    names: HashMap<CombatantId, String>,
}

impl Presenter {
    pub fn new(names: HashMap<CombatantId, String>) -> Self {
        Self { names }
    }

    fn name(&self, id: CombatantId) -> String {
        self.names.get(&id).cloned().unwrap_or_else(|| id.to_string())
    }

    /// One line per event worth showing; `None` for the rest.
    pub fn describe(&self, event: &Event) -> Option<String> {
        match event {
            Event::Turn(TurnEvent::RoundStarted { round }) => Some(format!("=== Round {round} ===")),
            Event::Turn(TurnEvent::TurnStarted { combatant, .. }) => {
                Some(format!("-- {}'s turn", self.name(*combatant)))
            }
            Event::Turn(TurnEvent::DefendExpired { combatant }) => {
                Some(format!("{} lowers their guard.", self.name(*combatant)))
            }
            Event::Turn(_) => None,
            Event::Action(ActionEvent::Resolved { result }) => {
                let actor = self.name(result.actor);
                let mut line = match &result.skill {
                    Some(skill) => format!("{actor} uses {skill}."),
                    None if result.effects.is_empty() => format!("{actor} waits."),
                    None => format!("{actor} defends."),
                };
                if result.wasted {
                    line.push_str(" No target remains.");
                }
                for effect in &result.effects {
                    line.push(' ');
                    line.push_str(&self.effect(effect));
                }
                Some(line)
            }
            Event::Action(ActionEvent::Rejected { reason, .. }) => {
                Some(format!("(action refused: {reason})"))
            }
            Event::Action(ActionEvent::Declared { .. }) => None,
            Event::Prompt(PromptEvent::DecisionRejected { reason, .. }) => {
                Some(format!("Cannot do that: {reason}"))
            }
            Event::Prompt(PromptEvent::AwaitingDecision { menu, .. }) => Some(self.menu(menu)),
            Event::Battle(BattleEvent::Started { hostiles, .. }) => {
                let names: Vec<&str> = hostiles.iter().map(|h| h.name.as_str()).collect();
                Some(format!("A battle begins against {}!", names.join(", ")))
            }
            Event::Battle(BattleEvent::Ended {
                outcome, rounds, ..
            }) => Some(format!("Battle over after {rounds} round(s): {outcome}")),
        }
    }

    fn effect(&self, effect: &TargetEffect) -> String {
        match *effect {
            TargetEffect::Damage {
                target,
                amount,
                remaining,
                defeated,
            } => {
                let suffix = if defeated { " and falls" } else { "" };
                format!(
                    "{} takes {amount} damage ({remaining} HP left){suffix}.",
                    self.name(target)
                )
            }
            TargetEffect::Heal {
                target,
                amount,
                remaining,
            } => format!("{} recovers {amount} HP ({remaining} HP).", self.name(target)),
            TargetEffect::Guard { target, defense } => {
                format!("{}'s defense rises to {defense}.", self.name(target))
            }
            TargetEffect::NoEffect { target } => format!("Nothing happens to {}.", self.name(target)),
        }
    }

    /// Menu shown while the coordinator waits for a decision.
    pub fn menu(&self, menu: &ActionMenu) -> String {
        let mut out = format!("What will {} do?\n  [a] attack\n", self.name(menu.actor));
        for option in &menu.skills {
            let marker = if option.affordable { "" } else { " (not enough mana)" };
            let _ = writeln!(
                out,
                "  [s {}] {} - {} MP, {} {}{}",
                option.slot, option.name, option.mana_cost, option.kind, option.power, marker
            );
        }
        if menu.defend {
            out.push_str("  [d] defend\n");
        }
        let allies: Vec<String> = menu
            .allies
            .iter()
            .map(|id| format!("{} {}", id, self.name(*id)))
            .collect();
        let _ = writeln!(out, "  allies: {}", allies.join(", "));
        out.push_str("  [q] retreat\n> ");
        out
    }
}

#[cfg(test)]
mod tests {
    use game_core::{ActionKind, ActionResult};

    use super::*;

    fn presenter() -> Presenter {
        Presenter::new(HashMap::from([
            (CombatantId(0), "Hero".to_string()),
            (CombatantId(1), "Goblin".to_string()),
        ]))
    }

    #[test]
    fn resolved_attack_lists_damage() {
        let event = Event::Action(ActionEvent::Resolved {
            result: ActionResult {
                actor: CombatantId(0),
                kind: ActionKind::BasicAttack,
                skill: Some("Strike".into()),
                mana_spent: 0,
                effects: vec![TargetEffect::Damage {
                    target: CombatantId(1),
                    amount: 7,
                    remaining: 0,
                    defeated: true,
                }],
                wasted: false,
            },
        });

        assert_eq!(
            presenter().describe(&event).unwrap(),
            "Hero uses Strike. Goblin takes 7 damage (0 HP left) and falls."
        );
    }

    #[test]
    fn declared_actions_are_silent() {
        let event = Event::Action(ActionEvent::Declared {
            action: game_core::Action::defend(CombatantId(0)),
        });
        assert_eq!(presenter().describe(&event), None);
    }
}
