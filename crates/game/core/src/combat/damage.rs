//! Damage calculation and application.

use crate::action::{Skill, TargetEffect};
use crate::state::Combatant;

/// Every landed attack deals at least this much damage.
pub const MINIMUM_DAMAGE: u32 = 1;

/// Calculate damage from an attack.
///
/// # Formula
///
/// ```text
/// raw_damage   = skill_power + attack
/// final_damage = max(1, raw_damage - defense)
/// ```
pub fn calculate_damage(skill_power: u32, attack: u32, defense: u32) -> u32 {
    skill_power
        .saturating_add(attack)
        .saturating_sub(defense)
        .max(MINIMUM_DAMAGE)
}

/// Resolves an attack skill used by an attacker with `attack` against `target`.
///
/// Health floors at zero. Uses the target's *current* defense, so a defending
/// target takes the doubled reduction.
pub fn apply_attack(attack: u32, target: &mut Combatant, skill: &Skill) -> TargetEffect {
    let damage = calculate_damage(skill.power, attack, target.current_defense());
    let dealt = target.take_damage(damage);

    TargetEffect::Damage {
        target: target.id,
        amount: dealt,
        remaining: target.health().current,
        defeated: !target.is_alive(),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::action::SkillKind;
    use crate::action::TargetRule;
    use crate::state::{CombatantId, CombatantSnapshot, Side};

    fn target(health: u32, defense: u32) -> Combatant {
        Combatant::spawn(
            CombatantId(1),
            Side::Hostile,
            CombatantSnapshot::new("Dummy", 100, 0, 0, defense, 1).with_health(health),
        )
    }

    #[test]
    fn defense_reduces_damage() {
        // attack 10 + power 20 against defense 25
        assert_eq!(calculate_damage(20, 10, 25), 5);
    }

    #[test]
    fn overwhelming_defense_still_deals_one() {
        assert_eq!(calculate_damage(0, 3, 500), 1);
    }

    #[test]
    fn apply_attack_floors_health_at_zero() {
        let mut dummy = target(4, 0);
        let skill = Skill::new("Smash", 0, SkillKind::Attack, 50, TargetRule::SingleHostile);

        let effect = apply_attack(10, &mut dummy, &skill);

        assert_eq!(
            effect,
            TargetEffect::Damage {
                target: CombatantId(1),
                amount: 4,
                remaining: 0,
                defeated: true,
            }
        );
        assert!(!dummy.is_alive());
    }

    proptest! {
        #[test]
        fn damage_is_never_below_one(power in 0u32..10_000, attack in 0u32..10_000, defense in 0u32..100_000) {
            prop_assert!(calculate_damage(power, attack, defense) >= MINIMUM_DAMAGE);
        }

        #[test]
        fn damage_matches_formula_when_above_floor(power in 0u32..1_000, attack in 0u32..1_000, defense in 0u32..1_000) {
            let raw = power + attack;
            let expected = if raw > defense { (raw - defense).max(1) } else { 1 };
            prop_assert_eq!(calculate_damage(power, attack, defense), expected);
        }
    }
}
