use std::fmt;

/// Unique identifier for a combatant within one battle.
///
/// Ids are assigned in roster-concatenation order (player roster first), so
/// comparing ids also compares spawn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which roster a combatant fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Hostile,
}

impl Side {
    /// Returns the side this one fights against.
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Hostile,
            Side::Hostile => Side::Player,
        }
    }
}

/// Integer resource meter (health, mana) that never leaves `[0, maximum]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    /// Creates a meter, clamping `current` into range.
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    /// Creates a full meter.
    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Missing amount (`maximum - current`).
    pub fn missing(&self) -> u32 {
        self.maximum - self.current
    }

    /// Removes up to `amount`, flooring at zero. Returns the amount removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current);
        self.current -= removed;
        removed
    }

    /// Adds up to `amount`, capping at the maximum. Returns the amount added.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let added = amount.min(self.missing());
        self.current += added;
        added
    }

    /// Overwrites the current value, clamped into range.
    pub fn set(&mut self, value: u32) {
        self.current = value.min(self.maximum);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_current_to_maximum() {
        let meter = ResourceMeter::new(150, 100);
        assert_eq!(meter.current, 100);
    }

    #[test]
    fn drain_floors_at_zero() {
        let mut meter = ResourceMeter::new(5, 10);
        assert_eq!(meter.drain(8), 5);
        assert!(meter.is_empty());
    }

    #[test]
    fn restore_caps_at_maximum() {
        let mut meter = ResourceMeter::new(90, 100);
        assert_eq!(meter.restore(30), 10);
        assert_eq!(meter.current, 100);
    }

    #[test]
    fn opponent_flips_side() {
        assert_eq!(Side::Player.opponent(), Side::Hostile);
        assert_eq!(Side::Hostile.opponent(), Side::Player);
    }
}
