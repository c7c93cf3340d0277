//! External-actor coordinator: actions decided outside the engine.
//!
//! On activation the coordinator publishes the actor's menu on the
//! [`Topic::Prompt`](crate::events::Topic::Prompt) topic and suspends until one
//! [`Decision`] arrives on its channel. Invalid decisions are answered with a
//! rejection event and a fresh prompt. There is no timeout; dropping the
//! returned future (as the battle loop does on force-end) abandons the wait
//! without consuming anything.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, mpsc};

use game_core::{
    Action, BattleState, CombatantId, TargetRule, available_actions, validate_action,
};

use crate::api::{ActionProvider, Result, RuntimeError};
use crate::events::{EventBus, PromptEvent};

/// One decision from the external source, for whichever combatant is being
/// prompted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    BasicAttack,
    /// `ally` is only honoured for single-friendly skills; every other target
    /// rule uses the resolver's own targeting.
    Skill {
        slot: usize,
        ally: Option<CombatantId>,
    },
    Defend,
}

impl Decision {
    /// Turns the decision into an engine action for `actor`.
    pub fn into_action(self, actor: CombatantId, state: &BattleState) -> Action {
        match self {
            Decision::BasicAttack => Action::basic_attack(actor),
            Decision::Defend => Action::defend(actor),
            Decision::Skill { slot, ally } => {
                let single_friendly = state
                    .combatant(actor)
                    .and_then(|c| c.skill(slot))
                    .is_some_and(|skill| skill.target == TargetRule::SingleFriendly);
                let target = if single_friendly { ally } else { None };
                Action::skill(actor, slot, target)
            }
        }
    }
}

/// Provider that waits for decisions from outside the engine.
pub struct ExternalActorCoordinator {
    /// Wrapped in a Mutex for interior mutability behind `&self`.
    decisions: Mutex<mpsc::Receiver<Decision>>,
    event_bus: EventBus,
}

impl ExternalActorCoordinator {
    pub fn new(decisions: mpsc::Receiver<Decision>, event_bus: EventBus) -> Self {
        Self {
            decisions: Mutex::new(decisions),
            event_bus,
        }
    }
}

#[async_trait]
impl ActionProvider for ExternalActorCoordinator {
    async fn provide_action(&self, actor: CombatantId, state: &BattleState) -> Result<Action> {
        let menu = available_actions(state, actor).ok_or(RuntimeError::UnknownCombatant(actor))?;
        let mut rx = self.decisions.lock().await;

        // Only decisions sent after this turn's prompt may answer it.
        let mut stale = 0usize;
        while rx.try_recv().is_ok() {
            stale += 1;
        }
        if stale > 0 {
            tracing::debug!(%actor, stale, "discarded decisions sent before the prompt");
        }

        loop {
            self.event_bus.publish(PromptEvent::AwaitingDecision {
                actor,
                menu: menu.clone(),
            });

            let decision = rx
                .recv()
                .await
                .ok_or(RuntimeError::DecisionChannelClosed { actor })?;
            let action = decision.into_action(actor, state);

            match validate_action(state, &action) {
                Ok(()) => {
                    tracing::debug!(%actor, ?decision, "external decision accepted");
                    return Ok(action);
                }
                Err(err) => {
                    tracing::warn!(%actor, ?decision, error = %err, "external decision rejected");
                    self.event_bus.publish(PromptEvent::DecisionRejected {
                        actor,
                        reason: err.to_string(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use game_core::{ActionKind, BattleConfig, BattleEngine, CombatantSnapshot, Skill, SkillKind};

    use super::*;
    use crate::events::{Event, Topic};

    fn state() -> BattleState {
        let mut state = BattleState::from_rosters(
            vec![
                CombatantSnapshot::new("Hero", 50, 10, 8, 3, 10)
                    .with_skill(
                        Skill::new("Cure", 4, SkillKind::Heal, 15, TargetRule::SingleFriendly)
                            .into_ref(),
                    )
                    .with_skill(
                        Skill::new("Smite", 20, SkillKind::Attack, 15, TargetRule::SingleHostile)
                            .into_ref(),
                    ),
                CombatantSnapshot::new("Squire", 30, 0, 4, 2, 6),
            ],
            vec![CombatantSnapshot::new("Rat", 10, 0, 2, 0, 1)],
            &BattleConfig::default(),
        )
        .unwrap();
        BattleEngine::new(&mut state).begin().unwrap();
        state
    }

    #[test]
    fn ally_is_kept_only_for_single_friendly_skills() {
        let state = state();
        let hero = CombatantId(0);
        let squire = CombatantId(1);

        let cure = Decision::Skill {
            slot: 0,
            ally: Some(squire),
        };
        assert_eq!(cure.into_action(hero, &state), Action::skill(hero, 0, Some(squire)));

        let smite = Decision::Skill {
            slot: 1,
            ally: Some(squire),
        };
        assert_eq!(smite.into_action(hero, &state), Action::skill(hero, 1, None));
    }

    #[tokio::test]
    async fn prompts_then_returns_valid_decision() {
        let bus = EventBus::new();
        let mut prompts = bus.subscribe(Topic::Prompt);
        let (tx, rx) = mpsc::channel(4);
        let coordinator = ExternalActorCoordinator::new(rx, bus);
        let state = state();

        let (action, ()) = tokio::join!(
            coordinator.provide_action(CombatantId(0), &state),
            async {
                match prompts.recv().await.unwrap() {
                    Event::Prompt(PromptEvent::AwaitingDecision { actor, menu }) => {
                        assert_eq!(actor, CombatantId(0));
                        assert!(menu.skill_menu_enabled());
                        assert_eq!(menu.allies, vec![CombatantId(0), CombatantId(1)]);
                    }
                    other => panic!("unexpected event: {other:?}"),
                }
                tx.send(Decision::Defend).await.unwrap();
            }
        );

        assert_eq!(action.unwrap().kind, ActionKind::Defend);
    }

    #[tokio::test]
    async fn unaffordable_skill_is_rejected_and_reprompted() {
        let bus = EventBus::new();
        let mut prompts = bus.subscribe(Topic::Prompt);
        let (tx, rx) = mpsc::channel(4);
        let coordinator = ExternalActorCoordinator::new(rx, bus);
        let state = state();

        let (action, ()) = tokio::join!(
            coordinator.provide_action(CombatantId(0), &state),
            async {
                assert!(matches!(
                    prompts.recv().await.unwrap(),
                    Event::Prompt(PromptEvent::AwaitingDecision { .. })
                ));
                tx.send(Decision::Skill { slot: 1, ally: None }).await.unwrap();
                assert!(matches!(
                    prompts.recv().await.unwrap(),
                    Event::Prompt(PromptEvent::DecisionRejected { actor: CombatantId(0), .. })
                ));
                assert!(matches!(
                    prompts.recv().await.unwrap(),
                    Event::Prompt(PromptEvent::AwaitingDecision { .. })
                ));
                tx.send(Decision::BasicAttack).await.unwrap();
            }
        );

        assert_eq!(action.unwrap().kind, ActionKind::BasicAttack);
        assert!(prompts.try_recv().is_err());
    }

    #[tokio::test]
    async fn decisions_sent_before_the_prompt_are_discarded() {
        let bus = EventBus::new();
        let mut prompts = bus.subscribe(Topic::Prompt);
        let (tx, rx) = mpsc::channel(4);
        let coordinator = ExternalActorCoordinator::new(rx, bus);
        let state = state();

        tx.send(Decision::BasicAttack).await.unwrap();
        tx.send(Decision::Skill { slot: 0, ally: None }).await.unwrap();

        let (action, ()) = tokio::join!(
            coordinator.provide_action(CombatantId(0), &state),
            async {
                assert!(matches!(
                    prompts.recv().await.unwrap(),
                    Event::Prompt(PromptEvent::AwaitingDecision { .. })
                ));
                tx.send(Decision::Defend).await.unwrap();
            }
        );

        assert_eq!(action.unwrap().kind, ActionKind::Defend);
    }

    #[tokio::test]
    async fn closed_channel_is_an_error() {
        let (tx, rx) = mpsc::channel(1);
        drop(tx);
        let coordinator = ExternalActorCoordinator::new(rx, EventBus::new());

        let err = coordinator
            .provide_action(CombatantId(0), &state())
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::DecisionChannelClosed { .. }));
    }
}
