//! Authoritative battle state.
//!
//! [`BattleState`] exclusively owns both rosters for the duration of one
//! battle. Field mutation happens only through [`crate::engine::BattleEngine`];
//! the forced health/mana setters are the one exception and are only accepted
//! once the outcome is terminal.

mod combatant;
mod common;
mod error;
mod turn;

pub use combatant::{Combatant, CombatantSnapshot};
pub use common::{CombatantId, ResourceMeter, Side};
pub use error::{InitializationError, StateError};
pub use turn::{BattleOutcome, TurnState};

use crate::config::BattleConfig;
use crate::error::ErrorContext;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    players: Vec<Combatant>,
    hostiles: Vec<Combatant>,
    pub(crate) turn: TurnState,
}

impl BattleState {
    /// Spawns a battle with one player-side combatant.
    pub fn new(
        player: CombatantSnapshot,
        hostiles: Vec<CombatantSnapshot>,
        config: &BattleConfig,
    ) -> Result<Self, InitializationError> {
        Self::from_rosters(vec![player], hostiles, config)
    }

    /// Spawns a battle from full rosters.
    ///
    /// Ids are assigned in concatenation order: players first, then hostiles.
    pub fn from_rosters(
        players: Vec<CombatantSnapshot>,
        hostiles: Vec<CombatantSnapshot>,
        config: &BattleConfig,
    ) -> Result<Self, InitializationError> {
        if players.is_empty() {
            return Err(InitializationError::EmptyPlayerRoster);
        }
        if hostiles.len() > config.max_hostiles {
            return Err(InitializationError::TooManyHostiles {
                count: hostiles.len(),
                max: config.max_hostiles,
            });
        }

        let player_count = players.len() as u32;
        let players = players
            .into_iter()
            .enumerate()
            .map(|(i, snapshot)| Combatant::spawn(CombatantId(i as u32), Side::Player, snapshot))
            .collect();
        let hostiles = hostiles
            .into_iter()
            .enumerate()
            .map(|(i, snapshot)| {
                Combatant::spawn(
                    CombatantId(player_count + i as u32),
                    Side::Hostile,
                    snapshot,
                )
            })
            .collect();

        Ok(Self {
            players,
            hostiles,
            turn: TurnState::new(),
        })
    }

    pub fn roster(&self, side: Side) -> &[Combatant] {
        match side {
            Side::Player => &self.players,
            Side::Hostile => &self.hostiles,
        }
    }

    /// Every combatant in roster-concatenation order (players first).
    pub fn combatants(&self) -> impl Iterator<Item = &Combatant> {
        self.players.iter().chain(self.hostiles.iter())
    }

    /// Living members of one roster, in roster order.
    pub fn alive(&self, side: Side) -> impl Iterator<Item = &Combatant> {
        self.roster(side).iter().filter(|c| c.is_alive())
    }

    pub fn all_dead(&self, side: Side) -> bool {
        self.roster(side).iter().all(|c| !c.is_alive())
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        let index = id.0 as usize;
        match index.checked_sub(self.players.len()) {
            None => self.players.get(index),
            Some(hostile_index) => self.hostiles.get(hostile_index),
        }
    }

    pub(crate) fn combatant_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        let index = id.0 as usize;
        match index.checked_sub(self.players.len()) {
            None => self.players.get_mut(index),
            Some(hostile_index) => self.hostiles.get_mut(hostile_index),
        }
    }

    /// Read-only view of the turn sequencing state.
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn outcome(&self) -> BattleOutcome {
        self.turn.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.turn.outcome.is_terminal()
    }

    pub fn round(&self) -> u32 {
        self.turn.round
    }

    /// Combatant owning the current turn slot.
    pub fn current_actor(&self) -> Option<CombatantId> {
        self.turn.current()
    }

    /// Overwrites a combatant's health for end-of-battle synchronization.
    pub fn force_set_health(&mut self, id: CombatantId, value: u32) -> Result<(), StateError> {
        self.ensure_terminal(id)?;
        self.combatant_mut(id)
            .ok_or(StateError::UnknownCombatant(id))?
            .force_health(value);
        Ok(())
    }

    /// Overwrites a combatant's mana for end-of-battle synchronization.
    pub fn force_set_mana(&mut self, id: CombatantId, value: u32) -> Result<(), StateError> {
        self.ensure_terminal(id)?;
        self.combatant_mut(id)
            .ok_or(StateError::UnknownCombatant(id))?
            .force_mana(value);
        Ok(())
    }

    fn ensure_terminal(&self, id: CombatantId) -> Result<(), StateError> {
        if self.is_terminal() {
            return Ok(());
        }
        Err(StateError::NotTerminal {
            outcome: self.turn.outcome,
            context: ErrorContext::new(self.turn.round)
                .with_actor(id)
                .with_message("forced stat writes are only allowed after the battle ends"),
        })
    }

    /// Consumes the state, returning the final rosters (players, hostiles).
    pub fn into_rosters(self) -> (Vec<Combatant>, Vec<Combatant>) {
        (self.players, self.hostiles)
    }
}
