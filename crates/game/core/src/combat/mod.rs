//! Damage and healing math.
//!
//! The formulas are pure functions over plain integers; the `apply_*`
//! helpers write the outcome into a [`crate::state::Combatant`].

mod damage;
mod heal;

pub use damage::{MINIMUM_DAMAGE, apply_attack, calculate_damage};
pub use heal::apply_heal;
