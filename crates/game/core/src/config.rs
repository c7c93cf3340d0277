/// Relative weights of the three autonomous-actor choices.
///
/// Weights are normalized before sampling, so only their ratios matter.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionWeights {
    pub basic_attack: f32,
    pub skill: f32,
    pub defend: f32,
}

impl ActionWeights {
    pub const DEFAULT_BASIC_ATTACK: f32 = 0.45;
    pub const DEFAULT_SKILL: f32 = 0.45;
    pub const DEFAULT_DEFEND: f32 = 0.10;

    pub const fn new(basic_attack: f32, skill: f32, defend: f32) -> Self {
        Self {
            basic_attack,
            skill,
            defend,
        }
    }

    /// Returns weights scaled to sum to 1.
    ///
    /// Negative or non-finite entries count as zero. If nothing positive is
    /// left, the defaults are used.
    pub fn normalized(&self) -> Self {
        let clean = |w: f32| if w.is_finite() && w > 0.0 { w } else { 0.0 };
        let (basic, skill, defend) = (
            clean(self.basic_attack),
            clean(self.skill),
            clean(self.defend),
        );
        let total = basic + skill + defend;
        if total <= 0.0 {
            return Self::default().normalized();
        }
        Self::new(basic / total, skill / total, defend / total)
    }
}

impl Default for ActionWeights {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_BASIC_ATTACK,
            Self::DEFAULT_SKILL,
            Self::DEFAULT_DEFEND,
        )
    }
}

/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Choice weights for computer-controlled combatants.
    pub ai_weights: ActionWeights,

    /// Largest hostile roster accepted at the spawn boundary.
    pub max_hostiles: usize,
}

impl BattleConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_HOSTILES: usize = 3;

    pub fn new() -> Self {
        Self {
            ai_weights: ActionWeights::default(),
            max_hostiles: Self::DEFAULT_MAX_HOSTILES,
        }
    }

    pub fn with_ai_weights(mut self, ai_weights: ActionWeights) -> Self {
        self.ai_weights = ai_weights;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_weights_sum_to_one() {
        let weights = ActionWeights::new(2.0, 1.0, 1.0).normalized();
        assert!((weights.basic_attack - 0.5).abs() < f32::EPSILON);
        assert!((weights.basic_attack + weights.skill + weights.defend - 1.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_weights_fall_back_to_defaults() {
        let weights = ActionWeights::new(0.0, -1.0, f32::NAN).normalized();
        assert_eq!(weights, ActionWeights::default().normalized());
    }
}
