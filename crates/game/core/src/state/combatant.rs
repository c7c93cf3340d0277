//! Battle participants and the stat snapshots they are spawned from.

use super::common::{CombatantId, ResourceMeter, Side};
use crate::action::{Skill, SkillRef};

/// Externally computed stats used to spawn one combatant.
///
/// Stats arrive already adjusted for fatigue and reputation; the engine never
/// recomputes them. `health`/`mana` default to their maximums when absent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSnapshot {
    pub name: String,
    pub max_health: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub health: Option<u32>,
    pub max_mana: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mana: Option<u32>,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub basic_skill: SkillRef,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<SkillRef>,
}

impl CombatantSnapshot {
    /// Creates a snapshot at full health and mana with a plain basic attack.
    pub fn new(
        name: impl Into<String>,
        max_health: u32,
        max_mana: u32,
        attack: u32,
        defense: u32,
        speed: u32,
    ) -> Self {
        Self {
            name: name.into(),
            max_health,
            health: None,
            max_mana,
            mana: None,
            attack,
            defense,
            speed,
            basic_skill: Skill::basic_attack("Strike", 0).into_ref(),
            skills: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_health(mut self, health: u32) -> Self {
        self.health = Some(health);
        self
    }

    #[must_use]
    pub fn with_mana(mut self, mana: u32) -> Self {
        self.mana = Some(mana);
        self
    }

    #[must_use]
    pub fn with_basic_skill(mut self, skill: SkillRef) -> Self {
        self.basic_skill = skill;
        self
    }

    #[must_use]
    pub fn with_skill(mut self, skill: SkillRef) -> Self {
        self.skills.push(skill);
        self
    }
}

/// One participant of a battle.
///
/// # Invariants
///
/// - `health.current == 0` means the combatant is dead for the rest of the battle
/// - `current_defense == base_defense * 2` while defending, `base_defense` otherwise
/// - `speed >= 1` and never changes mid-battle
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
    health: ResourceMeter,
    mana: ResourceMeter,
    attack: u32,
    base_defense: u32,
    current_defense: u32,
    speed: u32,
    defending: bool,
    defend_turns_remaining: u8,
    basic_skill: SkillRef,
    skills: Vec<SkillRef>,
}

impl Combatant {
    /// Spawns a combatant from a snapshot, clamping every value into range.
    pub fn spawn(id: CombatantId, side: Side, snapshot: CombatantSnapshot) -> Self {
        let health = match snapshot.health {
            Some(hp) => ResourceMeter::new(hp, snapshot.max_health),
            None => ResourceMeter::full(snapshot.max_health),
        };
        let mana = match snapshot.mana {
            Some(mp) => ResourceMeter::new(mp, snapshot.max_mana),
            None => ResourceMeter::full(snapshot.max_mana),
        };

        Self {
            id,
            name: snapshot.name,
            side,
            health,
            mana,
            attack: snapshot.attack,
            base_defense: snapshot.defense,
            current_defense: snapshot.defense,
            speed: snapshot.speed.max(1),
            defending: false,
            defend_turns_remaining: 0,
            basic_skill: snapshot.basic_skill,
            skills: snapshot.skills,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_empty()
    }

    pub fn health(&self) -> ResourceMeter {
        self.health
    }

    pub fn mana(&self) -> ResourceMeter {
        self.mana
    }

    pub fn attack(&self) -> u32 {
        self.attack
    }

    pub fn base_defense(&self) -> u32 {
        self.base_defense
    }

    pub fn current_defense(&self) -> u32 {
        self.current_defense
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn is_defending(&self) -> bool {
        self.defending
    }

    pub fn defend_turns_remaining(&self) -> u8 {
        self.defend_turns_remaining
    }

    pub fn basic_skill(&self) -> &SkillRef {
        &self.basic_skill
    }

    pub fn skills(&self) -> &[SkillRef] {
        &self.skills
    }

    pub fn skill(&self, slot: usize) -> Option<&SkillRef> {
        self.skills.get(slot)
    }

    pub fn can_afford(&self, skill: &Skill) -> bool {
        self.mana.current >= skill.mana_cost
    }

    // ===== mutation points (crate-internal, used by the resolver and scheduler) =====

    pub(crate) fn take_damage(&mut self, amount: u32) -> u32 {
        self.health.drain(amount)
    }

    pub(crate) fn heal(&mut self, amount: u32) -> u32 {
        self.health.restore(amount)
    }

    pub(crate) fn spend_mana(&mut self, amount: u32) -> u32 {
        self.mana.drain(amount)
    }

    /// Raises the defend stance. Returns false (and changes nothing) if already defending.
    pub(crate) fn begin_defend(&mut self) -> bool {
        if self.defending {
            return false;
        }
        self.defending = true;
        self.defend_turns_remaining = 1;
        self.current_defense = self.base_defense.saturating_mul(2);
        true
    }

    /// Start-of-own-turn status resolution. Returns true if the stance expired.
    pub(crate) fn tick_defend(&mut self) -> bool {
        if !self.defending {
            return false;
        }
        self.defend_turns_remaining = self.defend_turns_remaining.saturating_sub(1);
        if self.defend_turns_remaining == 0 {
            self.defending = false;
            self.current_defense = self.base_defense;
            return true;
        }
        false
    }

    pub(crate) fn force_health(&mut self, value: u32) {
        self.health.set(value);
    }

    pub(crate) fn force_mana(&mut self, value: u32) {
        self.mana.set(value);
    }

    /// Converts the combatant back into a snapshot carrying its final stats.
    pub fn to_snapshot(&self) -> CombatantSnapshot {
        CombatantSnapshot {
            name: self.name.clone(),
            max_health: self.health.maximum,
            health: Some(self.health.current),
            max_mana: self.mana.maximum,
            mana: Some(self.mana.current),
            attack: self.attack,
            defense: self.base_defense,
            speed: self.speed,
            basic_skill: self.basic_skill.clone(),
            skills: self.skills.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knight() -> Combatant {
        Combatant::spawn(
            CombatantId(0),
            Side::Player,
            CombatantSnapshot::new("Knight", 100, 20, 10, 8, 10),
        )
    }

    #[test]
    fn spawn_clamps_out_of_range_values() {
        let snapshot = CombatantSnapshot::new("Ghost", 50, 10, 5, 2, 0)
            .with_health(80)
            .with_mana(99);
        let ghost = Combatant::spawn(CombatantId(3), Side::Hostile, snapshot);

        assert_eq!(ghost.health().current, 50);
        assert_eq!(ghost.mana().current, 10);
        assert_eq!(ghost.speed(), 1);
    }

    #[test]
    fn defend_doubles_defense_and_expires_on_tick() {
        let mut knight = knight();

        assert!(knight.begin_defend());
        assert_eq!(knight.current_defense(), 16);
        assert_eq!(knight.defend_turns_remaining(), 1);

        assert!(knight.tick_defend());
        assert!(!knight.is_defending());
        assert_eq!(knight.current_defense(), 8);
    }

    #[test]
    fn defend_does_not_stack() {
        let mut knight = knight();
        assert!(knight.begin_defend());
        let before = knight.clone();

        assert!(!knight.begin_defend());
        assert_eq!(knight, before);
    }

    #[test]
    fn tick_without_stance_is_noop() {
        let mut knight = knight();
        assert!(!knight.tick_defend());
        assert_eq!(knight.current_defense(), 8);
    }

    #[test]
    fn snapshot_round_trip_keeps_final_stats() {
        let mut knight = knight();
        knight.take_damage(30);
        knight.spend_mana(5);

        let snapshot = knight.to_snapshot();
        assert_eq!(snapshot.health, Some(70));
        assert_eq!(snapshot.mana, Some(15));
        assert_eq!(snapshot.defense, 8);
    }
}
