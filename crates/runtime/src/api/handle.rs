//! Cloneable façade for talking to a running battle.
//!
//! [`BattleHandle`] hides channel plumbing: it delivers external decisions,
//! issues the out-of-band force-end command and streams events from specific
//! topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc};

use game_core::BattleOutcome;

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::providers::Decision;

/// Out-of-band commands processed by the battle loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    /// End the battle now, discarding any pending decision.
    ForceEnd { outcome: BattleOutcome },
}

/// Client-facing handle to interact with a battle
#[derive(Clone)]
pub struct BattleHandle {
    command_tx: mpsc::Sender<Command>,
    decision_tx: mpsc::Sender<Decision>,
    event_bus: EventBus,
}

impl BattleHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        decision_tx: mpsc::Sender<Decision>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            command_tx,
            decision_tx,
            event_bus,
        }
    }

    /// Deliver a decision for the combatant currently being prompted.
    ///
    /// Decisions are queued; the coordinator consumes exactly one per prompt
    /// and re-prompts if it is invalid.
    pub async fn submit_decision(&self, decision: Decision) -> Result<()> {
        self.decision_tx
            .send(decision)
            .await
            .map_err(|_| RuntimeError::DecisionQueueClosed)
    }

    /// Ask the battle to end immediately with `outcome`.
    ///
    /// A pending decision is discarded without applying any action. Ending an
    /// already finished battle is a no-op.
    pub async fn force_end(&self, outcome: BattleOutcome) -> Result<()> {
        if !outcome.is_terminal() {
            return Err(RuntimeError::NonTerminalOutcome(outcome));
        }
        self.command_tx
            .send(Command::ForceEnd { outcome })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Turn` - Round and turn transitions
    /// - `Topic::Action` - Declared, resolved and rejected actions
    /// - `Topic::Prompt` - Menus for the external decision source
    /// - `Topic::Battle` - Battle start and end
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut prompts = handle.subscribe(Topic::Prompt);
    /// while let Ok(event) = prompts.recv().await {
    ///     // Show the menu, then call `submit_decision`
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn force_end_requires_terminal_outcome() {
        let (command_tx, mut command_rx) = mpsc::channel(4);
        let (decision_tx, _decision_rx) = mpsc::channel(4);
        let handle = BattleHandle::new(command_tx, decision_tx, EventBus::new());

        let err = handle
            .force_end(BattleOutcome::Undetermined)
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::NonTerminalOutcome(_)));
        assert!(command_rx.try_recv().is_err());

        handle.force_end(BattleOutcome::PlayerDefeat).await.unwrap();
        assert_eq!(
            command_rx.try_recv().unwrap(),
            Command::ForceEnd {
                outcome: BattleOutcome::PlayerDefeat
            }
        );
    }

    #[tokio::test]
    async fn decisions_fail_once_battle_is_gone() {
        let (command_tx, _command_rx) = mpsc::channel(4);
        let (decision_tx, decision_rx) = mpsc::channel(4);
        let handle = BattleHandle::new(command_tx, decision_tx, EventBus::new());
        drop(decision_rx);

        let err = handle.submit_decision(Decision::Defend).await.unwrap_err();
        assert!(matches!(err, RuntimeError::DecisionQueueClosed));
    }
}
