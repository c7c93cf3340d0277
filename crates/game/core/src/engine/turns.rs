//! Turn scheduler: ordering, round counting, skipping the dead and
//! termination detection.

use crate::state::{BattleOutcome, CombatantId, Side};

use super::{BattleEngine, TurnError, TurnSignal, TurnStep};

/// Turn scheduling methods for BattleEngine.
impl<'a> BattleEngine<'a> {
    /// Builds the turn order from every living combatant.
    ///
    /// Sorted by descending speed. The sort is stable, so ties keep roster
    /// concatenation order (player roster first). Resets the index to 0 and
    /// the round counter to 1.
    pub fn initialize_turn_order(&mut self) -> Result<(), TurnError> {
        if !self.state.turn.order.is_empty() {
            return Err(TurnError::AlreadyInitialized);
        }

        let mut order: Vec<(u32, CombatantId)> = self
            .state
            .combatants()
            .filter(|c| c.is_alive())
            .map(|c| (c.speed(), c.id))
            .collect();
        if order.is_empty() {
            return Err(TurnError::NoLivingCombatants);
        }

        order.sort_by(|(a, _), (b, _)| b.cmp(a));

        self.state.turn.order = order.into_iter().map(|(_, id)| id).collect();
        self.state.turn.index = 0;
        self.state.turn.round = 1;
        self.state.turn.acted = false;
        Ok(())
    }

    /// Initializes the order, checks for an already-decided battle and starts
    /// the first turn.
    pub fn begin(&mut self) -> Result<TurnStep, TurnError> {
        self.initialize_turn_order()?;

        let mut signals = Vec::new();
        if !self.check_termination(&mut signals) {
            return Ok(TurnStep {
                signals,
                actor: None,
            });
        }
        Ok(self.start_turn_with(signals))
    }

    /// Ends the current turn, advances to the next slot and starts it.
    pub fn next_turn(&mut self) -> TurnStep {
        let mut signals = Vec::new();
        if self.state.is_terminal() {
            return TurnStep {
                signals,
                actor: None,
            };
        }

        if let Some(combatant) = self.state.turn.current() {
            signals.push(TurnSignal::TurnEnded { combatant });
        }
        if !self.advance(&mut signals) {
            return TurnStep {
                signals,
                actor: None,
            };
        }
        self.start_turn_with(signals)
    }

    /// Moves an undecided battle straight to `outcome`.
    ///
    /// Returns `Ok(None)` if the battle had already ended.
    pub fn force_end(&mut self, outcome: BattleOutcome) -> Result<Option<TurnSignal>, TurnError> {
        if !outcome.is_terminal() {
            return Err(TurnError::NonTerminalOutcome(outcome));
        }
        if self.state.is_terminal() {
            return Ok(None);
        }
        self.state.turn.outcome = outcome;
        Ok(Some(TurnSignal::BattleEnded {
            outcome,
            forced: true,
        }))
    }

    /// Outcome implied by the rosters, checking player defeat first.
    pub fn evaluate_outcome(&self) -> BattleOutcome {
        if self.state.all_dead(Side::Player) {
            BattleOutcome::PlayerDefeat
        } else if self.state.all_dead(Side::Hostile) {
            BattleOutcome::PlayerVictory
        } else {
            BattleOutcome::Undetermined
        }
    }

    /// Starts the turn for the current slot.
    ///
    /// Dead owners are skipped (their slot stays in the order). For a living
    /// owner, start-of-turn status resolution runs first: the defend stance
    /// counts down and expires here.
    fn start_turn_with(&mut self, mut signals: Vec<TurnSignal>) -> TurnStep {
        loop {
            if self.state.is_terminal() {
                return TurnStep {
                    signals,
                    actor: None,
                };
            }

            let Some(id) = self.state.turn.current() else {
                return TurnStep {
                    signals,
                    actor: None,
                };
            };
            let round = self.state.turn.round;
            self.state.turn.acted = false;

            if let Some(combatant) = self.state.combatant_mut(id)
                && combatant.is_alive()
            {
                if combatant.tick_defend() {
                    signals.push(TurnSignal::DefendExpired { combatant: id });
                }
                signals.push(TurnSignal::TurnStarted {
                    combatant: id,
                    round,
                });
                return TurnStep {
                    signals,
                    actor: Some(id),
                };
            }

            signals.push(TurnSignal::TurnSkipped { combatant: id });
            if !self.advance(&mut signals) {
                return TurnStep {
                    signals,
                    actor: None,
                };
            }
        }
    }

    /// Advances the index (wrapping into a new round) and checks termination.
    /// Returns false if the battle ended.
    fn advance(&mut self, signals: &mut Vec<TurnSignal>) -> bool {
        let turn = &mut self.state.turn;
        turn.index += 1;
        if turn.index >= turn.order.len() {
            turn.index = 0;
            turn.round += 1;
            signals.push(TurnSignal::RoundStarted { round: turn.round });
        }
        self.check_termination(signals)
    }

    /// Records a terminal outcome if one side is wiped out. Returns false if
    /// the battle is over.
    fn check_termination(&mut self, signals: &mut Vec<TurnSignal>) -> bool {
        let outcome = self.evaluate_outcome();
        if !outcome.is_terminal() {
            return true;
        }
        self.state.turn.outcome = outcome;
        signals.push(TurnSignal::BattleEnded {
            outcome,
            forced: false,
        });
        false
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::config::BattleConfig;
    use crate::state::{BattleState, CombatantSnapshot};

    fn unit(name: &str, speed: u32) -> CombatantSnapshot {
        CombatantSnapshot::new(name, 20, 0, 5, 0, speed)
    }

    fn names(state: &BattleState) -> Vec<String> {
        state
            .turn()
            .order()
            .iter()
            .map(|id| state.combatant(*id).unwrap().name.clone())
            .collect()
    }

    #[test]
    fn order_is_descending_speed() {
        let mut state = BattleState::new(
            unit("Hero", 10),
            vec![unit("Goblin", 5), unit("Bat", 8)],
            &BattleConfig::default(),
        )
        .unwrap();

        BattleEngine::new(&mut state).initialize_turn_order().unwrap();

        assert_eq!(names(&state), vec!["Hero", "Bat", "Goblin"]);
        assert_eq!(state.turn().index(), 0);
        assert_eq!(state.turn().round(), 1);
    }

    #[test]
    fn ties_keep_roster_order_with_players_first() {
        let mut state = BattleState::from_rosters(
            vec![unit("Hero", 7), unit("Squire", 7)],
            vec![unit("Wolf", 7), unit("Slime", 9)],
            &BattleConfig::default(),
        )
        .unwrap();

        BattleEngine::new(&mut state).initialize_turn_order().unwrap();

        assert_eq!(names(&state), vec!["Slime", "Hero", "Squire", "Wolf"]);
    }

    #[test]
    fn dead_combatants_are_not_ordered() {
        let mut state = BattleState::new(
            unit("Hero", 10),
            vec![unit("Corpse", 50).with_health(0), unit("Bat", 8)],
            &BattleConfig::default(),
        )
        .unwrap();

        BattleEngine::new(&mut state).initialize_turn_order().unwrap();

        assert_eq!(names(&state), vec!["Hero", "Bat"]);
    }

    #[test]
    fn round_increments_exactly_once_per_wrap() {
        let mut state = BattleState::new(
            unit("Hero", 10),
            vec![unit("Bat", 8)],
            &BattleConfig::default(),
        )
        .unwrap();
        let mut engine = BattleEngine::new(&mut state);

        let first = engine.begin().unwrap();
        assert_eq!(first.actor, Some(CombatantId(0)));

        let second = engine.next_turn();
        assert_eq!(second.actor, Some(CombatantId(1)));
        assert_eq!(engine.state().round(), 1);

        let third = engine.next_turn();
        assert_eq!(third.actor, Some(CombatantId(0)));
        assert_eq!(engine.state().round(), 2);
        assert!(third.signals.contains(&TurnSignal::RoundStarted { round: 2 }));
    }

    #[test]
    fn dead_slot_is_skipped() {
        let mut state = BattleState::new(
            unit("Hero", 10),
            vec![unit("Bat", 8), unit("Goblin", 5)],
            &BattleConfig::default(),
        )
        .unwrap();
        let mut engine = BattleEngine::new(&mut state);
        engine.begin().unwrap();

        engine
            .state_mut()
            .combatant_mut(CombatantId(1))
            .unwrap()
            .take_damage(100);

        let step = engine.next_turn();
        assert_eq!(step.actor, Some(CombatantId(2)));
        assert_eq!(
            step.signals,
            vec![
                TurnSignal::TurnEnded {
                    combatant: CombatantId(0)
                },
                TurnSignal::TurnSkipped {
                    combatant: CombatantId(1)
                },
                TurnSignal::TurnStarted {
                    combatant: CombatantId(2),
                    round: 1
                },
            ]
        );
    }

    #[test]
    fn victory_is_reported_before_any_further_turn() {
        let mut state = BattleState::new(
            unit("Hero", 10),
            vec![unit("A", 5), unit("B", 4), unit("C", 3)],
            &BattleConfig::default(),
        )
        .unwrap();
        let mut engine = BattleEngine::new(&mut state);
        engine.begin().unwrap();

        for id in 1..=3 {
            engine
                .state_mut()
                .combatant_mut(CombatantId(id))
                .unwrap()
                .take_damage(100);
        }

        let step = engine.next_turn();
        assert!(step.is_battle_over());
        assert_eq!(
            step.signals.last(),
            Some(&TurnSignal::BattleEnded {
                outcome: BattleOutcome::PlayerVictory,
                forced: false
            })
        );
        assert_eq!(engine.state().outcome(), BattleOutcome::PlayerVictory);

        // Terminal: nothing else runs.
        assert_eq!(engine.next_turn(), TurnStep::default());
    }

    #[test]
    fn defeat_when_player_roster_falls() {
        let mut state = BattleState::new(
            unit("Hero", 10),
            vec![unit("Bat", 8)],
            &BattleConfig::default(),
        )
        .unwrap();
        let mut engine = BattleEngine::new(&mut state);
        engine.begin().unwrap();
        engine
            .state_mut()
            .combatant_mut(CombatantId(0))
            .unwrap()
            .take_damage(100);

        let step = engine.next_turn();
        assert!(step.is_battle_over());
        assert_eq!(engine.state().outcome(), BattleOutcome::PlayerDefeat);
    }

    #[test]
    fn empty_hostile_roster_ends_immediately() {
        let mut state =
            BattleState::new(unit("Hero", 10), vec![], &BattleConfig::default()).unwrap();
        let step = BattleEngine::new(&mut state).begin().unwrap();

        assert!(step.is_battle_over());
        assert_eq!(state.outcome(), BattleOutcome::PlayerVictory);
    }

    #[test]
    fn force_end_only_applies_once() {
        let mut state = BattleState::new(
            unit("Hero", 10),
            vec![unit("Bat", 8)],
            &BattleConfig::default(),
        )
        .unwrap();
        let mut engine = BattleEngine::new(&mut state);
        engine.begin().unwrap();

        assert!(engine.force_end(BattleOutcome::Undetermined).is_err());
        assert_eq!(
            engine.force_end(BattleOutcome::PlayerDefeat).unwrap(),
            Some(TurnSignal::BattleEnded {
                outcome: BattleOutcome::PlayerDefeat,
                forced: true
            })
        );
        assert_eq!(engine.force_end(BattleOutcome::PlayerVictory).unwrap(), None);
        assert_eq!(engine.state().outcome(), BattleOutcome::PlayerDefeat);
    }

    proptest! {
        #[test]
        fn order_is_sorted_with_stable_ties(
            players in prop::collection::vec(0u32..6, 1..4),
            hostiles in prop::collection::vec(0u32..6, 0..4),
        ) {
            let mut state = BattleState::from_rosters(
                players.iter().map(|&speed| unit("P", speed)).collect(),
                hostiles.iter().map(|&speed| unit("H", speed)).collect(),
                &BattleConfig::default(),
            )
            .unwrap();
            BattleEngine::new(&mut state).initialize_turn_order().unwrap();

            let order = state.turn().order();
            prop_assert_eq!(order.len(), players.len() + hostiles.len());
            for pair in order.windows(2) {
                let first = state.combatant(pair[0]).unwrap();
                let second = state.combatant(pair[1]).unwrap();
                prop_assert!(first.speed() >= second.speed());
                // Ids follow roster concatenation, so equal speeds keep id order.
                if first.speed() == second.speed() {
                    prop_assert!(pair[0] < pair[1]);
                }
            }
        }

        #[test]
        fn round_advances_once_per_full_pass(
            speeds in prop::collection::vec(1u32..20, 2..5),
            passes in 1u32..4,
        ) {
            let mut state = BattleState::from_rosters(
                vec![unit("Hero", speeds[0])],
                speeds[1..].iter().map(|&speed| unit("Foe", speed)).collect(),
                &BattleConfig::default(),
            )
            .unwrap();
            let mut engine = BattleEngine::new(&mut state);
            engine.begin().unwrap();

            let slots = speeds.len() as u32;
            let mut round_signals = 0;
            for turn in 1..=(slots * passes) {
                let step = engine.next_turn();
                round_signals += step
                    .signals
                    .iter()
                    .filter(|signal| matches!(signal, TurnSignal::RoundStarted { .. }))
                    .count() as u32;
                prop_assert_eq!(engine.state().round(), 1 + turn / slots);
            }
            prop_assert_eq!(round_signals, passes);
            prop_assert_eq!(engine.state().turn().index(), 0);
        }
    }
}
