//! Battle orchestrator.
//!
//! [`Battle`] owns the state, the provider registry and the channels, and
//! drives the scheduler one turn at a time. A builder wires everything up;
//! [`BattleHandle`] is the cloneable façade for clients.
//!
//! While a provider is deciding, the loop also listens on the command channel,
//! so a force-end drops the pending decision without applying any action.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tokio::sync::mpsc;

use game_core::{
    Action, ActionResult, BattleConfig, BattleEngine, BattleOutcome, BattleState, CombatantId,
    CombatantSnapshot, GameError, Side, TurnSignal, TurnStep,
};

use crate::api::{
    ActionProvider, BattleHandle, Command, ProviderKind, ProviderRegistry, Result, RuntimeError,
};
use crate::events::{ActionEvent, BattleEvent, EventBus, TurnEvent};
use crate::providers::{Decision, ExternalActorCoordinator, WeightedAiProvider};
use crate::report::BattleReport;

/// Runtime configuration shared across the battle loop and its providers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub battle: BattleConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    pub decision_buffer_size: usize,
    /// Seed for every random draw in the battle; random when absent.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 8,
            decision_buffer_size: 8,
            seed: None,
        }
    }
}

/// Result of a single [`Battle::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A turn was played; more remain.
    Continue,
    Finished(BattleOutcome),
}

/// What interrupted the wait for a provider.
enum Turn {
    Decided(Result<Action>),
    Command(Command),
}

/// One battle from spawn to terminal outcome.
pub struct Battle {
    state: BattleState,
    providers: ProviderRegistry,
    rng: ChaCha8Rng,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    handle: BattleHandle,

    /// Combatant whose turn has started and who has not acted yet.
    current: Option<CombatantId>,
    started: bool,
    forced: bool,
}

impl Battle {
    /// Create a new battle builder
    pub fn builder() -> BattleBuilder {
        BattleBuilder::new()
    }

    /// Get a cloneable handle to this battle
    pub fn handle(&self) -> BattleHandle {
        self.handle.clone()
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn outcome(&self) -> BattleOutcome {
        self.state.outcome()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_terminal()
    }

    /// Builds the turn order and starts the first turn.
    ///
    /// Called implicitly by the first [`step`](Self::step); calling it again is
    /// a no-op.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Ok(());
        }

        let step = BattleEngine::new(&mut self.state).begin()?;
        self.started = true;

        let snapshots = |side| -> Vec<CombatantSnapshot> {
            self.state.roster(side).iter().map(|c| c.to_snapshot()).collect()
        };
        let started = BattleEvent::Started {
            order: self.state.turn().order().to_vec(),
            players: snapshots(Side::Player),
            hostiles: snapshots(Side::Hostile),
        };
        tracing::info!(combatants = self.state.turn().order().len(), "battle started");
        self.event_bus.publish(started);

        self.apply_step(step);
        Ok(())
    }

    /// Plays exactly one turn.
    ///
    /// Waits for the current combatant's provider; a force-end command that
    /// arrives first ends the battle instead.
    pub async fn step(&mut self) -> Result<StepOutcome> {
        self.start()?;

        while let Ok(command) = self.command_rx.try_recv() {
            self.handle_command(command)?;
        }
        if self.state.is_terminal() {
            return Ok(StepOutcome::Finished(self.state.outcome()));
        }

        let Some(actor) = self.current else {
            return Ok(StepOutcome::Finished(self.state.outcome()));
        };
        let combatant = self
            .state
            .combatant(actor)
            .ok_or(RuntimeError::UnknownCombatant(actor))?;
        let provider = self.providers.get_for(combatant)?;

        let turn = {
            let state = &self.state;
            tokio::select! {
                biased;
                Some(command) = self.command_rx.recv() => Turn::Command(command),
                action = provider.provide_action(actor, state) => Turn::Decided(action),
            }
        };

        let action = match turn {
            Turn::Command(command) => {
                self.handle_command(command)?;
                return Ok(StepOutcome::Finished(self.state.outcome()));
            }
            Turn::Decided(action) => action?,
        };

        if let Some(result) = self.resolve(actor, action) {
            self.event_bus.publish(ActionEvent::Resolved { result });
        }

        let step = BattleEngine::new(&mut self.state).next_turn();
        self.apply_step(step);

        Ok(match self.state.outcome() {
            BattleOutcome::Undetermined => StepOutcome::Continue,
            outcome => StepOutcome::Finished(outcome),
        })
    }

    /// Runs turns until the battle reaches a terminal outcome.
    pub async fn run(&mut self) -> Result<BattleReport> {
        loop {
            if let StepOutcome::Finished(_) = self.step().await? {
                return Ok(self.report());
            }
        }
    }

    pub fn report(&self) -> BattleReport {
        BattleReport::from_state(&self.state, self.forced)
    }

    /// Ends the battle with `outcome` unless it is already over.
    pub fn force_end(&mut self, outcome: BattleOutcome) -> Result<()> {
        let signal = BattleEngine::new(&mut self.state).force_end(outcome)?;
        if let Some(signal) = signal {
            self.forced = true;
            self.apply_step(TurnStep {
                signals: vec![signal],
                actor: None,
            });
        }
        self.current = None;
        Ok(())
    }

    /// Overwrites a combatant's health after the battle is over.
    pub fn force_set_health(&mut self, id: CombatantId, value: u32) -> Result<()> {
        Ok(self.state.force_set_health(id, value)?)
    }

    /// Overwrites a combatant's mana after the battle is over.
    pub fn force_set_mana(&mut self, id: CombatantId, value: u32) -> Result<()> {
        Ok(self.state.force_set_mana(id, value)?)
    }

    fn handle_command(&mut self, command: Command) -> Result<()> {
        match command {
            Command::ForceEnd { outcome } => {
                tracing::info!(%outcome, "force-ending battle");
                self.force_end(outcome)
            }
        }
    }

    /// Applies the provider's action, falling back to a basic attack and then
    /// to yielding if the engine refuses.
    fn resolve(&mut self, actor: CombatantId, action: Action) -> Option<ActionResult> {
        let attempts = [action, Action::basic_attack(actor), Action::yield_turn(actor)];
        let mut engine = BattleEngine::new(&mut self.state);

        for attempt in attempts {
            self.event_bus.publish(ActionEvent::Declared { action: attempt });
            match engine.execute(&attempt, &mut self.rng) {
                Ok(result) => {
                    tracing::debug!(
                        %actor,
                        kind = %result.kind,
                        damage = result.total_damage(),
                        healing = result.total_healing(),
                        wasted = result.wasted,
                        "action resolved"
                    );
                    return Some(result);
                }
                Err(err) => {
                    tracing::warn!(
                        %actor,
                        kind = %attempt.kind,
                        code = err.error_code(),
                        severity = err.severity().as_str(),
                        error = %err,
                        "action rejected"
                    );
                    self.event_bus.publish(ActionEvent::Rejected {
                        action: attempt,
                        reason: err.to_string(),
                    });
                }
            }
        }

        tracing::error!(%actor, "no action could be resolved");
        None
    }

    fn apply_step(&mut self, step: TurnStep) {
        for signal in &step.signals {
            match *signal {
                TurnSignal::BattleEnded { outcome, forced } => {
                    let rounds = self.state.round();
                    tracing::info!(%outcome, forced, rounds, "battle ended");
                    self.event_bus.publish(BattleEvent::Ended {
                        outcome,
                        forced,
                        rounds,
                    });
                }
                _ => {
                    if let Some(event) = TurnEvent::from_signal(signal) {
                        self.event_bus.publish(event);
                    }
                }
            }
        }
        self.current = step.actor;
    }
}

/// Builder for [`Battle`] with flexible configuration.
pub struct BattleBuilder {
    config: RuntimeConfig,
    players: Vec<CombatantSnapshot>,
    hostiles: Vec<CombatantSnapshot>,
    providers: ProviderRegistry,
}

impl BattleBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            players: Vec::new(),
            hostiles: Vec::new(),
            providers: ProviderRegistry::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn battle_config(mut self, battle: BattleConfig) -> Self {
        self.config.battle = battle;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Add a player-side combatant.
    pub fn player(mut self, snapshot: CombatantSnapshot) -> Self {
        self.players.push(snapshot);
        self
    }

    /// Add a hostile combatant.
    pub fn hostile(mut self, snapshot: CombatantSnapshot) -> Self {
        self.hostiles.push(snapshot);
        self
    }

    pub fn hostiles(mut self, snapshots: impl IntoIterator<Item = CombatantSnapshot>) -> Self {
        self.hostiles.extend(snapshots);
        self
    }

    /// Register a provider for `kind`, replacing the built-in one.
    pub fn provider(mut self, kind: ProviderKind, provider: impl ActionProvider + 'static) -> Self {
        self.providers.register(kind, provider);
        self
    }

    /// Bind one combatant to a provider kind. Ids follow roster order with
    /// players first.
    pub fn bind(mut self, combatant: CombatantId, kind: ProviderKind) -> Self {
        self.providers.bind(combatant, kind);
        self
    }

    pub fn side_default(mut self, side: Side, kind: ProviderKind) -> Self {
        self.providers.set_side_default(side, kind);
        self
    }

    /// Build the battle.
    ///
    /// Kinds without a registered provider get the built-in ones: the
    /// weighted AI for [`ProviderKind::Ai`] and the external-actor coordinator
    /// for [`ProviderKind::Interactive`].
    pub fn build(self) -> Result<Battle> {
        let Self {
            config,
            players,
            hostiles,
            mut providers,
        } = self;

        let state = BattleState::from_rosters(players, hostiles, &config.battle)?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        tracing::debug!(seed, "battle rng seeded");

        let event_bus = EventBus::with_capacity(config.event_buffer_size);
        let (command_tx, command_rx) = mpsc::channel::<Command>(config.command_buffer_size.max(1));
        let (decision_tx, decision_rx) =
            mpsc::channel::<Decision>(config.decision_buffer_size.max(1));

        if !providers.has(ProviderKind::Ai) {
            providers.register(
                ProviderKind::Ai,
                WeightedAiProvider::new(config.battle.ai_weights, rng.r#gen()),
            );
        }
        if !providers.has(ProviderKind::Interactive) {
            providers.register(
                ProviderKind::Interactive,
                ExternalActorCoordinator::new(decision_rx, event_bus.clone()),
            );
        }

        let handle = BattleHandle::new(command_tx, decision_tx, event_bus.clone());

        Ok(Battle {
            state,
            providers,
            rng,
            command_rx,
            event_bus,
            handle,
            current: None,
            started: false,
            forced: false,
        })
    }
}
