use crate::action::{Skill, TargetEffect};
use crate::state::Combatant;

/// Restores `skill.power` health, capped at the target's maximum.
///
/// Dead targets stay dead: the heal resolves to no effect.
pub fn apply_heal(target: &mut Combatant, skill: &Skill) -> TargetEffect {
    if !target.is_alive() {
        return TargetEffect::NoEffect { target: target.id };
    }

    let restored = target.heal(skill.power);
    TargetEffect::Heal {
        target: target.id,
        amount: restored,
        remaining: target.health().current,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::action::{SkillKind, TargetRule};
    use crate::state::{CombatantId, CombatantSnapshot, Side};

    fn hero(health: u32) -> Combatant {
        Combatant::spawn(
            CombatantId(0),
            Side::Player,
            CombatantSnapshot::new("Hero", 100, 0, 0, 0, 1).with_health(health),
        )
    }

    fn heal(power: u32) -> Skill {
        Skill::new("Mend", 5, SkillKind::Heal, power, TargetRule::SelfOnly)
    }

    #[test]
    fn full_health_heal_is_capped() {
        let mut hero = hero(100);
        let effect = apply_heal(&mut hero, &heal(30));

        assert_eq!(
            effect,
            TargetEffect::Heal {
                target: CombatantId(0),
                amount: 0,
                remaining: 100,
            }
        );
    }

    #[test]
    fn dead_target_is_not_revived() {
        let mut hero = hero(0);
        let effect = apply_heal(&mut hero, &heal(30));

        assert_eq!(effect, TargetEffect::NoEffect { target: CombatantId(0) });
        assert!(!hero.is_alive());
    }

    proptest! {
        #[test]
        fn heal_never_exceeds_maximum(health in 1u32..=100, power in 0u32..10_000) {
            let mut hero = hero(health);
            apply_heal(&mut hero, &heal(power));
            prop_assert!(hero.health().current <= hero.health().maximum);
        }
    }
}
